#![allow(dead_code)]

async fn test_find_video(pool: sqlx::PgPool) {
    use crate::modules::video::repository::VideoRepository;
    use crate::modules::video::repository_pg::VideoPgRepository;
    use uuid::Uuid;

    let repo = VideoPgRepository::new(pool);

    let id = Uuid::parse_str("01930e54-6c2b-7b1e-9f4a-8d21c0a3f15d").unwrap();

    let result = repo.find_by_id(&id).await.unwrap();

    println!("{:#?}", result);

    assert!(result.is_some());
}
