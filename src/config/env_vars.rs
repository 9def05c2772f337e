//! Environment variable expansion for configured paths.
//!
//! Configuration files may refer to directories such as `%APPDATA%\Game` or
//! `$HOME/.local/share/game`; these are expanded before the paths are used.

/// Parse Windows-style environment variables (%VAR%)
pub fn parse_windows_env_vars(path: &str) -> String {
    let mut result = path.to_string();

    if result.contains('%') {
        let mut i = 0;
        while let Some(start) = result[i..].find('%') {
            let real_start = i + start;
            if let Some(end) = result[real_start + 1..].find('%') {
                let real_end = real_start + 1 + end;
                let var_name = &result[real_start + 1..real_end];

                match std::env::var(var_name) {
                    Ok(var_value) if !var_name.is_empty() => {
                        let to_replace = format!("%{}%", var_name);
                        result = result.replacen(&to_replace, &var_value, 1);
                        i = real_start + var_value.len();
                    }
                    _ => {
                        // Leave unknown variables in place
                        i = real_end + 1;
                    }
                }
            } else {
                i = real_start + 1;
            }

            if i >= result.len() {
                break;
            }
        }
    }

    result
}

/// Parse Unix-style environment variables ($VAR and ${VAR})
pub fn parse_unix_env_vars(path: &str) -> String {
    let mut result = path.to_string();

    // ${VAR} first; unknown braced variables expand to nothing
    let mut i = 0;
    while let Some(pos) = result[i..].find("${") {
        let start = i + pos;
        let Some(end) = result[start + 2..].find('}') else {
            break;
        };
        let var_end = start + 2 + end;
        let var_value = std::env::var(&result[start + 2..var_end]).unwrap_or_default();
        result.replace_range(start..=var_end, &var_value);
        i = start + var_value.len();
    }

    // Then $VAR, where the name ends at the first character outside [A-Za-z0-9_]
    let mut i = 0;
    while i < result.len() {
        let Some(pos) = result[i..].find('$') else {
            break;
        };
        let var_start = i + pos;

        let var_end = result[var_start + 1..]
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .map(|offset| var_start + 1 + offset)
            .unwrap_or(result.len());

        if var_end > var_start + 1 {
            let var_name = result[var_start + 1..var_end].to_string();
            if let Ok(var_value) = std::env::var(&var_name) {
                let to_replace = format!("${}", var_name);
                result = result.replacen(&to_replace, &var_value, 1);
                i = var_start + var_value.len();
            } else {
                i = var_end;
            }
        } else {
            i = var_start + 1;
        }
    }

    result
}

/// Expand both variable styles in a configured path
pub fn expand_env_vars(path: &str) -> String {
    let mut expanded = path.to_string();

    if expanded.contains('%') {
        expanded = parse_windows_env_vars(&expanded);
    }

    if expanded.contains('$') {
        expanded = parse_unix_env_vars(&expanded);
    }

    expanded
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_parse_windows_env_vars_basic() {
        env::set_var("RU_TEST_WIN_VAR", "testvalue");

        assert_eq!(parse_windows_env_vars("%RU_TEST_WIN_VAR%"), "testvalue");
        assert_eq!(
            parse_windows_env_vars("%RU_TEST_WIN_VAR%\\Game\\Logs"),
            "testvalue\\Game\\Logs"
        );

        env::remove_var("RU_TEST_WIN_VAR");
    }

    #[test]
    fn test_parse_windows_env_vars_nonexistent() {
        assert_eq!(
            parse_windows_env_vars("%RU_DOES_NOT_EXIST%\\file.txt"),
            "%RU_DOES_NOT_EXIST%\\file.txt"
        );
    }

    #[test]
    fn test_parse_windows_env_vars_malformed() {
        assert_eq!(parse_windows_env_vars("%INCOMPLETE"), "%INCOMPLETE");
        assert_eq!(parse_windows_env_vars("%%"), "%%");
        assert_eq!(parse_windows_env_vars("%"), "%");
    }

    #[test]
    fn test_parse_unix_env_vars_both_styles() {
        env::set_var("RU_TEST_HOME", "/home/player");
        env::set_var("RU_TEST_GAME", "mygame");

        assert_eq!(
            parse_unix_env_vars("$RU_TEST_HOME/.local/share/${RU_TEST_GAME}"),
            "/home/player/.local/share/mygame"
        );
        assert_eq!(parse_unix_env_vars("$RU_TEST_HOME-x"), "/home/player-x");

        env::remove_var("RU_TEST_HOME");
        env::remove_var("RU_TEST_GAME");
    }

    #[test]
    fn test_parse_unix_env_vars_self_referencing_value() {
        env::set_var("RU_TEST_LOOP", "${RU_TEST_LOOP}");
        env::set_var("RU_TEST_LOOP_WIN", "%RU_TEST_LOOP_WIN%");

        assert_eq!(parse_unix_env_vars("${RU_TEST_LOOP}/logs"), "${RU_TEST_LOOP}/logs");
        assert_eq!(
            parse_unix_env_vars("${RU_TEST_LOOP}/${RU_TEST_LOOP}"),
            "${RU_TEST_LOOP}/${RU_TEST_LOOP}"
        );
        assert_eq!(parse_windows_env_vars("%RU_TEST_LOOP_WIN%\\x"), "%RU_TEST_LOOP_WIN%\\x");

        env::remove_var("RU_TEST_LOOP");
        env::remove_var("RU_TEST_LOOP_WIN");
    }

    #[test]
    fn test_parse_unix_env_vars_nonexistent() {
        assert_eq!(parse_unix_env_vars("$RU_DOES_NOT_EXIST"), "$RU_DOES_NOT_EXIST");
        assert_eq!(parse_unix_env_vars("${RU_DOES_NOT_EXIST}"), "");
    }

    #[test]
    fn test_parse_unix_env_vars_edge_cases() {
        assert_eq!(parse_unix_env_vars("$"), "$");
        assert_eq!(parse_unix_env_vars("${"), "${");
        assert_eq!(parse_unix_env_vars("${incomplete"), "${incomplete");
        assert_eq!(parse_unix_env_vars("$$"), "$$");
    }

    #[test]
    fn test_expand_env_vars_plain_path_untouched() {
        assert_eq!(expand_env_vars("/var/lib/game"), "/var/lib/game");
    }
}
