use crate::core::ChangedFile;

const APPLICATION_CONFIG_NAMES: [&str; 2] = ["application.yml", "application.yaml"];

/// Keeps only Spring-style application config files (case-sensitive substring match).
pub fn find_config_changes(files: &[ChangedFile]) -> Vec<&ChangedFile> {
    files
        .iter()
        .filter(|file| {
            APPLICATION_CONFIG_NAMES
                .iter()
                .any(|name| file.filename.contains(name))
        })
        .collect()
}
