use crate::session::Session;
use config::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub api_settings: ApiSettings,
    #[serde(default)]
    pub gallery_settings: GallerySettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    pub api_base_url: String,
    #[serde(default)]
    pub credentials: CredentialPolicy,
    #[serde(default)]
    pub admin_password: Option<String>,
}

impl ApiSettings {
    pub fn new(url: &str) -> Self {
        Self {
            api_base_url: url.to_string(),
            credentials: CredentialPolicy::default(),
            admin_password: None,
        }
    }
}

/// Whether credentialed calls forward the session cookie.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialPolicy {
    #[default]
    Include,
    Omit,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct GallerySettings {
    #[serde(default)]
    pub refresh: RefreshMode,
    #[serde(default)]
    pub privileged_controls: ControlVisibility,
}

/// How the gallery reacts to new albums and uploads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshMode {
    /// Cards are prepended and thumbnails appended in place.
    #[default]
    Incremental,
    /// Server order is authoritative; the gallery is reloaded after every upload batch.
    ReloadAfterUpload,
}

/// Which sessions get the create and upload controls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlVisibility {
    #[default]
    AdminOnly,
    Always,
}

impl ControlVisibility {
    pub fn allows(self, session: &Session) -> bool {
        match self {
            ControlVisibility::AdminOnly => session.is_admin(),
            ControlVisibility::Always => true,
        }
    }
}

pub fn get_configuration(cfg_file: &str) -> Result<Settings, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::new(cfg_file, config::FileFormat::Yaml))
        .add_source(
            config::Environment::with_prefix("ALBUMSYNC")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

pub struct ConfigFolder {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
}

impl ConfigFolder {
    pub fn new() -> io::Result<Self> {
        let home_dir = env::var("HOME").map_err(|_| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Failed to get HOME environment variable",
            )
        })?;

        Ok(Self::in_home(Path::new(&home_dir)))
    }

    pub fn in_home(home_dir: &Path) -> Self {
        Self {
            config_dir: get_config_dir_name(home_dir),
            config_file: get_config_file_name(home_dir),
        }
    }
}

fn get_config_dir_name(home_dir: &Path) -> PathBuf {
    home_dir.join(".albumsync")
}

fn get_config_file_name(home_dir: &Path) -> PathBuf {
    home_dir.join(".albumsync").join("config.yaml")
}

pub fn create_config(cfg_folder: ConfigFolder) -> anyhow::Result<()> {
    println!("\x1b[1m\x1b[32mCreating configuration...\x1b[0m");
    let config_dir = cfg_folder.config_dir;

    if config_dir.exists() && !confirm_overwrite()? {
        println!("\x1b[33mOperation cancelled.\x1b[0m");
        return Ok(());
    }

    fs::create_dir_all(&config_dir)?;

    let config_content = include_str!("config_template.yaml");
    fs::write(&cfg_folder.config_file, config_content)?;

    println!("\x1b[32mConfiguration folder created at:");
    println!("  -> ~/.albumsync");
    println!("Configuration file created at:");
    println!("  -> ~/.albumsync/config.yaml");
    println!("\x1b[0mPlease edit the configuration file with your backend address.");

    Ok(())
}

fn confirm_overwrite() -> Result<bool, io::Error> {
    println!("\x1b[31mThe configuration folder already exists.");
    println!("Do you want to overwrite the configuration file? (y/N)\x1b[0m");

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().eq_ignore_ascii_case("y"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_minimal_configuration_uses_defaults() {
        let file = write_config("api_settings:\n  api_base_url: \"http://localhost:5000\"\n");

        let settings = get_configuration(file.path().to_str().unwrap()).unwrap();

        assert_eq!(settings.api_settings.api_base_url, "http://localhost:5000");
        assert_eq!(settings.api_settings.credentials, CredentialPolicy::Include);
        assert!(settings.api_settings.admin_password.is_none());
        assert_eq!(settings.gallery_settings.refresh, RefreshMode::Incremental);
        assert_eq!(
            settings.gallery_settings.privileged_controls,
            ControlVisibility::AdminOnly
        );
    }

    #[test]
    fn test_full_configuration() {
        let file = write_config(
            r#"
api_settings:
  api_base_url: "https://portfolio.example.com"
  credentials: omit
  admin_password: "secret"
gallery_settings:
  refresh: reload_after_upload
  privileged_controls: always
"#,
        );

        let settings = get_configuration(file.path().to_str().unwrap()).unwrap();

        assert_eq!(settings.api_settings.credentials, CredentialPolicy::Omit);
        assert_eq!(
            settings.api_settings.admin_password.as_deref(),
            Some("secret")
        );
        assert_eq!(
            settings.gallery_settings.refresh,
            RefreshMode::ReloadAfterUpload
        );
        assert_eq!(
            settings.gallery_settings.privileged_controls,
            ControlVisibility::Always
        );
    }

    #[test]
    fn test_template_is_valid_configuration() {
        let file = write_config(include_str!("config_template.yaml"));

        let settings = get_configuration(file.path().to_str().unwrap()).unwrap();

        assert_eq!(settings.api_settings.api_base_url, "http://localhost:5000");
    }

    #[test]
    fn test_control_visibility() {
        assert!(ControlVisibility::AdminOnly.allows(&Session::admin()));
        assert!(!ControlVisibility::AdminOnly.allows(&Session::visitor()));
        assert!(ControlVisibility::Always.allows(&Session::visitor()));
    }

    #[test]
    fn test_config_folder_layout() {
        let folder = ConfigFolder::in_home(Path::new("/home/nacho"));
        assert_eq!(folder.config_dir, Path::new("/home/nacho/.albumsync"));
        assert_eq!(
            folder.config_file,
            Path::new("/home/nacho/.albumsync/config.yaml")
        );
    }
}
