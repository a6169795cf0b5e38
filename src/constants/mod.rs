pub struct Env {
    pub database_url: String,
    pub frontend_url: String,
    pub ip: String,
    pub port: u16,
    pub max_file_size_mb: u64,
    pub upload_path: String,
    pub thumbnail_path: String,
    pub thumbnail_width: u32,
    pub thumbnail_height: u32,
    pub ffmpeg_path: String,
    pub thumbnail_timeout_secs: u64,
}

impl Env {
    fn new() -> Self {
        let database_url = std::env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set in .env file or environment variable");

        let frontend_url =
            std::env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:4200".to_string());
        let ip = std::env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .expect("PORT must be a valid u16 integer");

        let max_file_size_mb = std::env::var("MAX_FILE_SIZE_MB")
            .unwrap_or_else(|_| "100".to_string())
            .parse::<u64>()
            .expect("MAX_FILE_SIZE_MB must be a valid u64 integer");
        let upload_path =
            std::env::var("UPLOAD_PATH").unwrap_or_else(|_| "uploads/videos".to_string());
        let thumbnail_path =
            std::env::var("THUMBNAIL_PATH").unwrap_or_else(|_| "uploads/thumbnails".to_string());

        let thumbnail_width = std::env::var("THUMBNAIL_WIDTH")
            .unwrap_or_else(|_| "256".to_string())
            .parse::<u32>()
            .expect("THUMBNAIL_WIDTH must be a valid u32 integer");
        let thumbnail_height = std::env::var("THUMBNAIL_HEIGHT")
            .unwrap_or_else(|_| "256".to_string())
            .parse::<u32>()
            .expect("THUMBNAIL_HEIGHT must be a valid u32 integer");

        let ffmpeg_path = std::env::var("FFMPEG_PATH").unwrap_or_else(|_| "ffmpeg".to_string());
        let thumbnail_timeout_secs = std::env::var("THUMBNAIL_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .expect("THUMBNAIL_TIMEOUT_SECS must be a valid u64 integer");

        Env {
            database_url,
            frontend_url,
            ip,
            port,
            max_file_size_mb,
            upload_path,
            thumbnail_path,
            thumbnail_width,
            thumbnail_height,
            ffmpeg_path,
            thumbnail_timeout_secs,
        }
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}
