//! Rendering of handler output into the message shown to submitters.

pub const VALIDATED_BANNER: &str = "YOUR FILE IS VALIDATED!\n";
pub const ERRORS_BANNER: &str = "----------------ERRORS----------------\n";
pub const WARNINGS_BANNER: &str = "-------------WARNINGS-------------\n";

/// Combine error and warning text into one report.
///
/// Text is copied verbatim; callers terminate each line with `\n` so the
/// banners start on their own line.
pub fn collect_errors_and_warnings(errors: &str, warnings: &str) -> String {
    let mut message = String::with_capacity(
        ERRORS_BANNER.len() + errors.len() + WARNINGS_BANNER.len() + warnings.len(),
    );
    if errors.is_empty() {
        message.push_str(VALIDATED_BANNER);
    } else {
        message.push_str(ERRORS_BANNER);
        message.push_str(errors);
    }
    if !warnings.is_empty() {
        message.push_str(WARNINGS_BANNER);
        message.push_str(warnings);
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_without_warnings() {
        assert_eq!(
            collect_errors_and_warnings("", ""),
            "YOUR FILE IS VALIDATED!\n"
        );
    }

    #[test]
    fn errors_then_warnings() {
        assert_eq!(
            collect_errors_and_warnings("error\nnow", "warning\nnow"),
            "----------------ERRORS----------------\n\
             error\nnow\
             -------------WARNINGS-------------\n\
             warning\nnow"
        );
    }

    #[test]
    fn warnings_only_keep_validated_banner() {
        assert_eq!(
            collect_errors_and_warnings("", "warning\nnow"),
            "YOUR FILE IS VALIDATED!\n\
             -------------WARNINGS-------------\n\
             warning\nnow"
        );
    }

    #[test]
    fn errors_only() {
        insta::assert_snapshot!(collect_errors_and_warnings("bad column\n", ""), @r"
        ----------------ERRORS----------------
        bad column
        ");
    }
}
