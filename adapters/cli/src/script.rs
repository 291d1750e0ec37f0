use tallgrass_core::Input;

/// Turns a scripted key sequence into input events.
///
/// Newlines map to Enter, tabs to Tab and escape characters to Esc; every
/// other character is delivered as typed.
pub(crate) fn parse_inputs(script: &str) -> Vec<Input> {
    script
        .chars()
        .map(|ch| match ch {
            '\n' | '\r' => Input::Enter,
            '\t' => Input::Tab,
            '\u{1b}' => Input::Esc,
            other => Input::Char(other),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_characters_become_named_keys() {
        assert_eq!(
            parse_inputs("l\t.\n"),
            vec![
                Input::Char('l'),
                Input::Tab,
                Input::Char('.'),
                Input::Enter
            ]
        );
        assert!(parse_inputs("").is_empty());
    }
}
