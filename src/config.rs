use clap::Parser;

pub const DEFAULT_API_BASE: &str = "http://54.221.144.32/api";

#[derive(Debug, Clone, Parser)]
#[command(name = "file_uploader", about = "Upload local files to a remote upload endpoint")]
pub struct Config {
    /// Base URL of the upload API; files are posted to `<api-base>/upload/`
    #[arg(long, env = "UPLOADER_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Keep the selection when the server answers with a body that cannot be parsed
    #[arg(long, env = "UPLOADER_KEEP_SELECTION_ON_INVALID_RESPONSE")]
    pub keep_selection_on_invalid_response: bool,

    #[arg(long, default_value_t = 640.0)]
    pub width: f32,

    #[arg(long, default_value_t = 720.0)]
    pub height: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_upload_api() {
        let config = Config::try_parse_from(["file_uploader"]).unwrap();
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert!(!config.keep_selection_on_invalid_response);
        assert_eq!(config.width, 640.0);
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "file_uploader",
            "--api-base",
            "http://localhost:8000/api",
            "--keep-selection-on-invalid-response",
            "--height",
            "500",
        ])
        .unwrap();
        assert_eq!(config.api_base, "http://localhost:8000/api");
        assert!(config.keep_selection_on_invalid_response);
        assert_eq!(config.height, 500.0);
    }
}
