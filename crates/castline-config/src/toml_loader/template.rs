//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# castline configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[session]
# Credentials issued by the media service. Each can also be supplied through
# CASTLINE_API_KEY, CASTLINE_SESSION_ID and CASTLINE_TOKEN.
# api_key = ""
# session_id = ""
# token = ""

[publisher]
# name = ""              # empty = host name
# video_type = "screen"  # screen, camera
# audio_fallback = false
# quality = "medium"     # low, medium, high, ultra

[subscriber]
# subscribe_to_self = false

[ui]
# alert_capacity = 16    # 1-256
# show_clock = true

[logging]
# level = "info"         # trace, debug, info, warn, error
"##
}
