use std::time::SystemTime;

const COLOR_INFO: &str = "\x1b[38;2;90;160;100m";
const COLOR_PASS: &str = "\x1b[38;2;90;160;100m";
const COLOR_STEP: &str = "\x1b[38;2;118;101;149m";
const COLOR_WARN: &str = "\x1b[38;2;242;165;0m";
const COLOR_ERROR: &str = "\x1b[38;2;215;80;110m";
const COLOR_CASE: &str = "\x1b[38;2;118;101;149m";
const COLOR_RESET: &str = "\x1b[0m";

/// Timestamped status lines for people watching a harness run.
pub struct HarnessLogger;

impl HarnessLogger {
    pub fn info(msg: &str) {
        println!("{}", Self::line("INFO ", COLOR_INFO, msg));
    }

    pub fn pass_case(case: &str, summary: &str) {
        println!("{}", Self::pass_line(case, summary));
    }

    pub(crate) fn pass_line(case: &str, summary: &str) -> String {
        Self::line(
            "PASS ",
            COLOR_PASS,
            &format!(
                "{}{}{} ✓ Test passed: {}",
                COLOR_CASE, case, COLOR_RESET, summary
            ),
        )
    }

    pub fn step(msg: &str) {
        println!("{}", Self::line("STEP ", COLOR_STEP, msg));
    }

    pub fn warn(msg: &str) {
        println!("{}", Self::line("WARN ", COLOR_WARN, msg));
    }

    pub fn error(msg: &str) {
        println!("{}", Self::line("ERROR", COLOR_ERROR, msg));
    }

    pub fn error_case(case: &str, msg: &str) {
        println!(
            "{}",
            Self::line(
                "ERROR",
                COLOR_ERROR,
                &format!("{}{}{} {}", COLOR_CASE, case, COLOR_RESET, msg)
            )
        );
    }

    pub fn fix(msg: &str) {
        println!("{}", Self::line("FIX  ", COLOR_WARN, msg));
    }

    fn line(level: &str, color: &str, msg: &str) -> String {
        format!(
            "{}  {}{}{}  {}",
            Self::timestamp(),
            color,
            level,
            COLOR_RESET,
            msg
        )
    }

    fn timestamp() -> String {
        let now = SystemTime::now();
        let datetime: chrono::DateTime<chrono::Local> = now.into();
        datetime.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_layout() {
        let line = HarnessLogger::line("INFO ", COLOR_INFO, "✅ All tests passed!");
        assert!(line.ends_with("INFO \x1b[0m  ✅ All tests passed!"));
        // "YYYY-MM-DD HH:MM:SS"
        assert_eq!(line.find("  "), Some(19));
    }

    #[test]
    fn test_pass_line_names_case_and_summary() {
        let line = HarnessLogger::pass_line("addition", "2 + 2 = 4");
        assert!(line.contains("PASS"));
        assert!(line.contains("addition"));
        assert!(line.ends_with(" ✓ Test passed: 2 + 2 = 4"));

        let line = HarnessLogger::pass_line(
            "addition_commutative",
            "Commutative property (7 + 13 = 13 + 7 = 20)",
        );
        assert!(line.ends_with("✓ Test passed: Commutative property (7 + 13 = 13 + 7 = 20)"));
    }
}
