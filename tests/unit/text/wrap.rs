use super::*;

fn mono(px: f32) -> MonospaceMeasure {
    MonospaceMeasure { advance_px: px }
}

#[test]
fn short_text_stays_on_one_line() {
    let lines = wrap_greedy("hello world", 600.0, &mut mono(10.0)).unwrap();
    assert_eq!(lines, vec!["hello world"]);
}

#[test]
fn wraps_at_fixed_pixel_width() {
    // "aaa bbb " is 8 chars = 80px; adding "ccc " makes 120px > 100px.
    let lines = wrap_greedy("aaa bbb ccc ddd eee", 100.0, &mut mono(10.0)).unwrap();
    assert_eq!(lines, vec!["aaa bbb", "ccc ddd", "eee"]);
}

#[test]
fn trailing_space_counts_toward_the_limit() {
    // "abcd " is 50px: exactly at the limit fits, one pixel less does not.
    let lines = wrap_greedy("abcd abcd", 100.0, &mut mono(10.0)).unwrap();
    assert_eq!(lines, vec!["abcd abcd"]);
    let lines = wrap_greedy("abcd abcd", 99.0, &mut mono(10.0)).unwrap();
    assert_eq!(lines, vec!["abcd", "abcd"]);
}

#[test]
fn overlong_word_gets_its_own_line() {
    let lines = wrap_greedy("hi incomprehensibilities ok", 50.0, &mut mono(10.0)).unwrap();
    assert_eq!(lines, vec!["hi", "incomprehensibilities", "ok"]);

    let lines = wrap_greedy("incomprehensibilities", 50.0, &mut mono(10.0)).unwrap();
    assert_eq!(lines, vec!["incomprehensibilities"]);
}

#[test]
fn empty_text_yields_one_empty_line() {
    let lines = wrap_greedy("", 100.0, &mut mono(10.0)).unwrap();
    assert_eq!(lines, vec![""]);
}

#[test]
fn arabic_words_are_kept_in_logical_order() {
    let quote = "الصبر مفتاح الفرج";
    let lines = wrap_greedy(quote, 70.0, &mut mono(10.0)).unwrap();
    assert_eq!(lines, vec!["الصبر", "مفتاح", "الفرج"]);
}

struct FailingMeasure;

impl TextMeasure for FailingMeasure {
    fn measure(&mut self, _text: &str) -> PostreelResult<f32> {
        Err(crate::foundation::error::PostreelError::render("no font"))
    }
}

#[test]
fn measure_errors_propagate() {
    assert!(wrap_greedy("a b", 10.0, &mut FailingMeasure).is_err());
}
