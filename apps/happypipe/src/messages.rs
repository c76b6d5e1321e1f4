//! Message builders for the fail stages.

/// Appended when the files were not reported in detail.
pub const MORE_INFO: &str =
    "\n    Info:\n    Use the report stage (happypipe run --report) for more information about errors";

const INDENT: &str = "\n    ";

pub fn error_word(count: usize) -> &'static str {
    if count > 1 {
        "errors"
    } else {
        "error"
    }
}

pub fn path_word(count: usize) -> &'static str {
    if count > 1 {
        "paths"
    } else {
        "path"
    }
}

/// `Fail on Error! N error(s) in M path(s):` followed by the paths.
///
/// The hint is added unless the file went through the report stage.
pub fn fail_on_error(count: usize, paths: &[&str], formatted: Option<bool>) -> String {
    let mut msg = format!(
        "Fail on Error! {} {} in {} {}:{}{}",
        count,
        error_word(count),
        paths.len(),
        path_word(paths.len()),
        INDENT,
        paths.join(INDENT)
    );
    if formatted != Some(true) {
        msg.push_str(MORE_INFO);
    }
    msg
}

/// One accumulated line of the fail-after-error summary.
pub fn has_errors_line(count: usize, path: &str) -> String {
    format!("has {} {} in {}", count, error_word(count), path)
}

/// `Fail after Error! N error(s) in M path(s):` followed by the lines.
///
/// The hint is added unless the last file with errors was explicitly
/// marked as not formatted.
pub fn fail_after_error(total: usize, lines: &[String], last_formatted: Option<bool>) -> String {
    let mut msg = format!(
        "Fail after Error! {} {} in {} {}:{}{}",
        total,
        error_word(total),
        lines.len(),
        path_word(lines.len()),
        INDENT,
        lines.join(INDENT)
    );
    if last_formatted != Some(false) {
        msg.push_str(MORE_INFO);
    }
    msg
}
