use uuid::Uuid;

use plog_backend::use_cases::uploads::{infer_image_content_type, public_url, upload_path};

#[test]
fn derived_path_is_deterministic() {
    let id = Uuid::parse_str("0a0e8bd0-13a7-4bd2-a1a4-52c4c3a1a111").unwrap();
    let path = upload_path("alice", "avatar", &id);
    assert_eq!(path, format!("images/alice/avatar/{}", id));

    // Same inputs, same path.
    assert_eq!(path, upload_path("alice", "avatar", &id));
}

#[test]
fn distinct_identifiers_never_collide() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    assert_ne!(
        upload_path("alice", "avatar", &a),
        upload_path("alice", "avatar", &b)
    );
}

#[test]
fn public_url_is_domain_plus_encoded_key() {
    let id = Uuid::parse_str("0a0e8bd0-13a7-4bd2-a1a4-52c4c3a1a111").unwrap();
    let key = format!("{}/cat.png", upload_path("alice", "avatar", &id));
    assert_eq!(
        public_url("https://cdn.plog.example", &key),
        format!("https://cdn.plog.example/images/alice/avatar/{}/cat.png", id)
    );
}

#[test]
fn spaces_and_unicode_are_percent_encoded() {
    let url = public_url("https://cdn.plog.example", "images/alice/avatar/x/my cat.png");
    assert!(url.ends_with("my%20cat.png"));

    let url = public_url("https://cdn.plog.example", "images/alice/avatar/x/고양이.png");
    assert!(!url.contains('고'));
    assert!(url.ends_with(".png"));
}

#[test]
fn only_image_types_are_accepted() {
    assert_eq!(infer_image_content_type("cat.png").unwrap(), "image/png");
    assert_eq!(infer_image_content_type("photo.jpeg").unwrap(), "image/jpeg");
    assert_eq!(infer_image_content_type("anim.gif").unwrap(), "image/gif");
    assert!(infer_image_content_type("report.pdf").is_err());
    assert!(infer_image_content_type("archive.tar.gz").is_err());
    assert!(infer_image_content_type("noextension").is_err());
}
