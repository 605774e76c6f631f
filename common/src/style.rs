use std::time::Duration;

// inline style values written by the enhancement code

pub const VISIBLE_OPACITY: &str = "1";
pub const HIDDEN_OPACITY: &str = "0";
pub const NO_OFFSET: &str = "translateY(0)";

pub fn seconds(d: Duration) -> String {
    format!("{}s", d.as_secs_f64())
}

pub fn translate_y(px: u32) -> String {
    format!("translateY({px}px)")
}

pub fn translate(x: i32, y: i32) -> String {
    format!("translate({x}px, {y}px)")
}

pub fn fade_transition(d: Duration) -> String {
    let secs = seconds(d);
    format!("opacity {secs} ease, transform {secs} ease")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_values() {
        assert_eq!(seconds(Duration::from_millis(150)), "0.15s");
        assert_eq!(seconds(Duration::ZERO), "0s");
        assert_eq!(translate_y(20), "translateY(20px)");
        assert_eq!(translate(-3, 40), "translate(-3px, 40px)");
        assert_eq!(
            fade_transition(Duration::from_millis(600)),
            "opacity 0.6s ease, transform 0.6s ease"
        );
    }
}
