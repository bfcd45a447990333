//! Animated property values.
//!
//! Numeric properties (opacity, scale, translation) are plain numbers. String
//! properties such as `blur(20px)` or `inset(100% 0% 0% 0%)` are kept as a
//! [`Template`]: the literal text split around its numbers. Two templates can
//! be interpolated only when their literal text matches, in which case each
//! number is interpolated independently and written back into the text.

use std::fmt;

use super::Animatable;

/// A string value split into literal segments and the numbers between them.
///
/// `segments.len()` is always `numbers.len() + 1`.
#[derive(Clone, Debug, PartialEq)]
pub struct Template {
    segments: Vec<String>,
    numbers: Vec<f32>,
}

impl Template {
    /// Split `text` around every number it contains.
    pub fn parse(text: &str) -> Self {
        let mut segments = Vec::new();
        let mut numbers = Vec::new();
        let mut literal = String::new();

        let chars: Vec<char> = text.chars().collect();
        let mut after_word = false;
        let mut i = 0;
        while i < chars.len() {
            if !after_word && starts_number(&chars, i) {
                let start = i;
                if chars[i] == '-' || chars[i] == '+' {
                    i += 1;
                }
                let mut seen_dot = false;
                while i < chars.len() && (chars[i].is_ascii_digit() || (chars[i] == '.' && !seen_dot))
                {
                    seen_dot |= chars[i] == '.';
                    i += 1;
                }
                let token: String = chars[start..i].iter().collect();
                match token.parse::<f32>() {
                    Ok(number) => {
                        segments.push(std::mem::take(&mut literal));
                        numbers.push(number);
                    }
                    Err(_) => literal.push_str(&token),
                }
                after_word = false;
            } else {
                // Digits glued to an identifier (`h1`, `x2`) stay literal
                after_word = chars[i].is_ascii_alphanumeric() || chars[i] == '_';
                literal.push(chars[i]);
                i += 1;
            }
        }
        segments.push(literal);

        Self { segments, numbers }
    }

    /// The numbers embedded in the template, in order
    pub fn numbers(&self) -> &[f32] {
        &self.numbers
    }

    /// Whether `other` has the same literal text around the same count of numbers
    pub fn is_compatible(&self, other: &Template) -> bool {
        self.segments == other.segments
    }
}

fn starts_number(chars: &[char], i: usize) -> bool {
    let c = chars[i];
    let next_is_digit = |j: usize| chars.get(j).is_some_and(|n| n.is_ascii_digit());
    match c {
        '0'..='9' => true,
        '-' | '+' => {
            next_is_digit(i + 1) || (chars.get(i + 1) == Some(&'.') && next_is_digit(i + 2))
        }
        '.' => next_is_digit(i + 1),
        _ => false,
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            f.write_str(segment)?;
            if let Some(number) = self.numbers.get(i) {
                write!(f, "{}", round_for_display(*number))?;
            }
        }
        Ok(())
    }
}

fn round_for_display(value: f32) -> f32 {
    let rounded = (value * 10_000.0).round() / 10_000.0;
    // Avoid printing `-0`
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

impl Animatable for Template {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        if !from.is_compatible(to) {
            return if t < 1.0 { from.clone() } else { to.clone() };
        }
        Template {
            segments: from.segments.clone(),
            numbers: from
                .numbers
                .iter()
                .zip(&to.numbers)
                .map(|(a, b)| f32::lerp(a, b, t))
                .collect(),
        }
    }
}

/// Value of an animated property
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    Number(f32),
    Templated(Template),
}

impl PropertyValue {
    /// Numeric value, if this is a plain number
    pub fn as_number(&self) -> Option<f32> {
        match self {
            PropertyValue::Number(n) => Some(*n),
            PropertyValue::Templated(_) => None,
        }
    }

    /// Whether this value can be interpolated into `other`
    pub fn is_compatible(&self, other: &PropertyValue) -> bool {
        match (self, other) {
            (PropertyValue::Number(_), PropertyValue::Number(_)) => true,
            (PropertyValue::Templated(a), PropertyValue::Templated(b)) => a.is_compatible(b),
            _ => false,
        }
    }
}

impl Animatable for PropertyValue {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        match (from, to) {
            (PropertyValue::Number(a), PropertyValue::Number(b)) => {
                PropertyValue::Number(f32::lerp(a, b, t))
            }
            (PropertyValue::Templated(a), PropertyValue::Templated(b)) => {
                PropertyValue::Templated(Template::lerp(a, b, t))
            }
            // Mismatched kinds snap at the end of the track
            _ => {
                if t < 1.0 {
                    from.clone()
                } else {
                    to.clone()
                }
            }
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Number(n) => write!(f, "{}", round_for_display(*n)),
            PropertyValue::Templated(template) => fmt::Display::fmt(template, f),
        }
    }
}

impl From<f32> for PropertyValue {
    fn from(value: f32) -> Self {
        PropertyValue::Number(value)
    }
}

/// Lets unsuffixed float literals be used as values
impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Number(value as f32)
    }
}

impl From<&str> for PropertyValue {
    fn from(text: &str) -> Self {
        PropertyValue::Templated(Template::parse(text))
    }
}

impl From<String> for PropertyValue {
    fn from(text: String) -> Self {
        PropertyValue::from(text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_blur() {
        let template = Template::parse("blur(20px)");
        assert_eq!(template.numbers(), &[20.0]);
        assert_eq!(template.to_string(), "blur(20px)");
    }

    #[test]
    fn test_parse_inset() {
        let template = Template::parse("inset(100% 0% 0% 0%)");
        assert_eq!(template.numbers(), &[100.0, 0.0, 0.0, 0.0]);
        assert_eq!(template.to_string(), "inset(100% 0% 0% 0%)");
    }

    #[test]
    fn test_parse_negative_and_fraction() {
        let template = Template::parse("translate(-12.5px, .5em)");
        assert_eq!(template.numbers(), &[-12.5, 0.5]);
    }

    #[test]
    fn test_identifier_digits_are_literal() {
        let template = Template::parse("h12 3px");
        assert_eq!(template.numbers(), &[3.0]);
        assert_eq!(template.to_string(), "h12 3px");
    }

    #[test]
    fn test_lerp_blur() {
        let from = PropertyValue::from("blur(20px)");
        let to = PropertyValue::from("blur(0px)");
        let mid = PropertyValue::lerp(&from, &to, 0.5);
        assert_eq!(mid.to_string(), "blur(10px)");
    }

    #[test]
    fn test_lerp_clip_path_all_numbers() {
        let from = PropertyValue::from("inset(100% 0% 0% 0%)");
        let to = PropertyValue::from("inset(0% 0% 0% 0%)");
        let quarter = PropertyValue::lerp(&from, &to, 0.25);
        assert_eq!(quarter.to_string(), "inset(75% 0% 0% 0%)");
    }

    #[test]
    fn test_incompatible_templates() {
        let px = PropertyValue::from("blur(20px)");
        let em = PropertyValue::from("blur(2em)");
        assert!(!px.is_compatible(&em));
        assert!(!px.is_compatible(&PropertyValue::Number(1.0)));
        assert_eq!(PropertyValue::lerp(&px, &em, 0.5), px);
        assert_eq!(PropertyValue::lerp(&px, &em, 1.0), em);
    }

    #[test]
    fn test_number_lerp() {
        let mid = PropertyValue::lerp(&PropertyValue::Number(0.0), &PropertyValue::Number(1.0), 0.25);
        assert_eq!(mid, PropertyValue::Number(0.25));
    }
}
