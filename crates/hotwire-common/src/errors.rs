use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("both {file_flag} and {content_flag} flags set")]
    ConflictingSources {
        file_flag: String,
        content_flag: String,
    },

    #[error(
        "flag {file_flag} or {content_flag} is required for running this command and content cannot be empty"
    )]
    MissingRequiredContent {
        file_flag: String,
        content_flag: String,
    },

    #[error("loading file {} for {file_flag}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        file_flag: String,
        #[source]
        source: std::io::Error,
    },

    #[error("writing file {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("env variable {0} not found")]
    MissingEnvVar(String),
}

#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("getting absolute file path for {}: {source}", path.display())]
    Path {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("adding path {} to file watcher: {source}", path.display())]
    Setup {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum HotwireError {
    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Watch(#[from] WatchError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_error_display() {
        let err = ContentError::ConflictingSources {
            file_flag: "config-file".into(),
            content_flag: "config".into(),
        };
        assert_eq!(err.to_string(), "both config-file and config flags set");

        let err = ContentError::MissingRequiredContent {
            file_flag: "config-file".into(),
            content_flag: "config".into(),
        };
        assert!(err.to_string().starts_with("flag config-file or config is required"));

        let err = ContentError::MissingEnvVar("HOME_DIR".into());
        assert_eq!(err.to_string(), "env variable HOME_DIR not found");
    }

    #[test]
    fn file_read_error_keeps_source() {
        use std::error::Error as _;

        let err = ContentError::FileRead {
            path: PathBuf::from("/tmp/missing.yaml"),
            file_flag: "config-file".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file missing"),
        };
        assert!(err.to_string().contains("/tmp/missing.yaml"));
        assert!(err.to_string().contains("config-file"));
        assert!(err.source().is_some());
    }

    #[test]
    fn file_write_error_display() {
        let err = ContentError::FileWrite {
            path: PathBuf::from("/etc/hotwire/config.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "writing file /etc/hotwire/config.yaml: denied");
    }

    #[test]
    fn watch_error_display() {
        let err = WatchError::Path {
            path: PathBuf::from("relative/config.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no cwd"),
        };
        assert_eq!(
            err.to_string(),
            "getting absolute file path for relative/config.yaml: no cwd"
        );

        let err = WatchError::Setup {
            path: PathBuf::from("/etc/hotwire"),
            source: notify::Error::generic("inotify limit reached"),
        };
        assert!(err.to_string().contains("/etc/hotwire"));
        assert!(err.to_string().contains("inotify limit reached"));
    }

    #[test]
    fn hotwire_error_from_content() {
        let content_err = ContentError::MissingEnvVar("TOKEN".into());
        let err: HotwireError = content_err.into();
        assert!(matches!(err, HotwireError::Content(_)));
        assert!(err.to_string().contains("TOKEN"));
    }

    #[test]
    fn hotwire_error_from_watch() {
        let watch_err = WatchError::Setup {
            path: PathBuf::from("/etc/hotwire"),
            source: notify::Error::generic("no such directory"),
        };
        let err: HotwireError = watch_err.into();
        assert!(matches!(err, HotwireError::Watch(WatchError::Setup { .. })));
        assert!(err.to_string().contains("no such directory"));
    }
}
