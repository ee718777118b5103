//! Static version and license details shown by `/about`.

/// Key whose value is rendered as the legal comment
pub const COMMENT_KEY: &str = "Open Source Comment";

/// Ordered `(key, value)` pairs describing this build
pub const ABOUT_INFO: &[(&str, &str)] = &[
    ("Version Code", "9.1"),
    ("Version type", "Open Source"),
    ("Developer Name", "PSBDx"),
    ("User License Type", "Open Source"),
    (
        COMMENT_KEY,
        "the current developer can edit the bot code and change config methods but \
         developer has no permission to edit the algorithm's functions or the \
         encrypted messages/codes.",
    ),
];
