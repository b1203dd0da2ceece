//! Route table and credential key names of the webshell file API.

/// `POST` credentials, returns `session_key` and `home_path`.
pub const LOGIN: &str = "/api/v2/login/";
/// `GET`, credential carried under [`LOGOUT_SESSION_HEADER`].
pub const LOGOUT: &str = "/api/v2/logout/";
/// `GET` list, `POST` create, `DELETE` delete, `PUT` rename.
pub const FILES: &str = "/api/v2/files/";
pub const COPY: &str = "/api/v2/files/copy/";
pub const MOVE: &str = "/api/v2/files/move/";
/// `GET` read, `POST` write.
pub const CONTENT: &str = "/api/v2/files/content/";
pub const TRANSMISSION: &str = "/api/v2/files/transmission/";
pub const DOWNLOAD: &str = "/api/v2/files/download/";
pub const ATTR: &str = "/api/v2/files/attr/";
pub const CHMOD: &str = "/api/v2/files/chmod/";
pub const CHOWN: &str = "/api/v2/files/chown/";
pub const EXECUTE: &str = "/api/v2/files/execute/";
pub const QUOTA: &str = "/api/v2/files/quota/";

/// Header carrying the session token on every file operation.
pub const SESSION_HEADER: &str = "sessionKey";

/// Header carrying the session token on logout.
///
/// The service reads a different key here than on the file routes; both
/// are kept as the service expects them.
pub const LOGOUT_SESSION_HEADER: &str = "session_key";

/// Login response field holding the issued token.
pub const SESSION_KEY_FIELD: &str = "session_key";
/// Login response field holding the remote home directory.
pub const HOME_PATH_FIELD: &str = "home_path";
