//! 입력 해석 (단계 처리 전에 평가되는 전역 입력)

use regex::Regex;
use std::sync::OnceLock;

/// 뒤로가기
pub const BACK: &str = "0";
/// 세션 종료
pub const CANCEL: &str = "00";
/// 다음 페이지
pub const NEXT_PAGE: &str = "98";

/// 한 턴의 입력
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input<'a> {
    /// 시작 코드 (예: `*123#`)
    Start,
    /// `00`
    Cancel,
    /// `0`
    Back,
    /// `98` (다음 페이지가 있을 때만)
    NextPage,
    /// 그 외 (메뉴 번호, 필드 값)
    Text(&'a str),
}

impl<'a> Input<'a> {
    /// 원본 입력 해석 (앞뒤 공백 제거)
    pub fn parse(raw: &'a str, start_code: &str, has_more_pages: bool) -> Self {
        let text = raw.trim();
        match text {
            t if t == start_code => Input::Start,
            CANCEL => Input::Cancel,
            BACK => Input::Back,
            NEXT_PAGE if has_more_pages => Input::NextPage,
            t => Input::Text(t),
        }
    }
}

/// 1부터 시작하는 메뉴 번호
pub fn selection(text: &str) -> Option<usize> {
    text.parse::<usize>().ok().filter(|n| *n >= 1)
}

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date pattern"))
}

/// `YYYY-MM-DD` 형식 검사 (형식만, 달력 검증은 하지 않음)
pub fn is_valid_date(text: &str) -> bool {
    date_pattern().is_match(text)
}

/// 음이 아닌 정수 금액
pub fn parse_amount(text: &str) -> Option<u64> {
    // u64::from_str는 앞의 '+'를 받아들인다
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse::<u64>().ok()
}

/// 필수 텍스트 (공백만 있으면 None)
pub fn required_text(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_inputs() {
        assert_eq!(Input::parse("*123#", "*123#", false), Input::Start);
        assert_eq!(Input::parse(" 00 ", "*123#", false), Input::Cancel);
        assert_eq!(Input::parse("0", "*123#", false), Input::Back);
        assert_eq!(Input::parse("98", "*123#", true), Input::NextPage);
        assert_eq!(Input::parse("98", "*123#", false), Input::Text("98"));
        assert_eq!(Input::parse("3", "*123#", false), Input::Text("3"));
    }

    #[test]
    fn test_selection() {
        assert_eq!(selection("1"), Some(1));
        assert_eq!(selection("12"), Some(12));
        assert_eq!(selection("0"), None);
        assert_eq!(selection("-1"), None);
        assert_eq!(selection("abc"), None);
    }

    #[test]
    fn test_date_format() {
        assert!(is_valid_date("2024-05-01"));
        assert!(is_valid_date("0000-99-99"));
        assert!(!is_valid_date("2024-5-1"));
        assert!(!is_valid_date("2024/05/01"));
        assert!(!is_valid_date(" 2024-05-01"));
        assert!(!is_valid_date("2024-05-01x"));
        assert!(!is_valid_date("２０２４-05-01"));
    }

    #[test]
    fn test_amount() {
        assert_eq!(parse_amount("50000"), Some(50_000));
        assert_eq!(parse_amount("0"), Some(0));
        assert_eq!(parse_amount("-5"), None);
        assert_eq!(parse_amount("12.5"), None);
        assert_eq!(parse_amount("+5"), None);
        assert_eq!(parse_amount(" 5"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("99999999999999999999"), None);
    }
}
