//! Shared defaults for addressable versioning

/// Separator between version segments
pub const VERSION_SEPARATOR: char = '.';

/// Separator between the declared version and the build stamp of a full version
pub const BUILD_STAMP_SEPARATOR: char = '+';

/// `chrono` format of the build stamp appended to full versions
pub const BUILD_STAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Version given to manifests created for new groups
pub const DEFAULT_INITIAL_MANIFEST_VERSION: &str = "0.0.1";

/// Directory holding manifest files
pub const DEFAULT_MANIFEST_LOCATION: &str = "Assets/Data/SceneManagement/Manifests/";

/// Groups that never get a manifest
pub const DEFAULT_GROUPS_TO_IGNORE: &[&str] = &["Built In Data", "Default"];
