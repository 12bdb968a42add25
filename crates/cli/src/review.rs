use std::io::{BufRead, Write};

use anyhow::Result;
use review_session::{KeyEvent, ReviewCommand, ReviewView};

use crate::render::{search_text, section_summary, status_line};

/// One line of review input
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ReviewInput {
    Key(KeyEvent),
    /// 1-based field number
    Goto(usize),
    Search(String),
    /// 1-based field number from the search results
    Pick(usize),
    Section(String),
    Quit,
}

pub(crate) fn parse_line(line: &str) -> Option<std::result::Result<ReviewInput, String>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let key = |name: &str| -> std::result::Result<ReviewInput, String> {
        Ok(ReviewInput::Key(KeyEvent::new(name)))
    };
    let number = |raw: &str| {
        raw.parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| format!("expected a field number, got '{raw}'"))
    };

    let parsed = match word.to_ascii_lowercase().as_str() {
        "space" => key(" "),
        "enter" => key("Enter"),
        "j" => key("j"),
        "k" => key("k"),
        "down" => key("ArrowDown"),
        "up" => key("ArrowUp"),
        "/" => key("/"),
        "ctrl+k" | "cmd+k" => Ok(ReviewInput::Key(KeyEvent::new("k").with_ctrl())),
        "escape" | "esc" => key("Escape"),
        "goto" => number(rest).map(ReviewInput::Goto),
        "pick" => number(rest).map(ReviewInput::Pick),
        "search" => Ok(ReviewInput::Search(rest.to_string())),
        "section" if !rest.is_empty() => Ok(ReviewInput::Section(rest.to_string())),
        "quit" | "q" => Ok(ReviewInput::Quit),
        _ => Err(format!("unknown input '{line}'")),
    };
    Some(parsed)
}

/// Drive `view` from line input, printing the review status after every event
pub(crate) fn run_review<R: BufRead, W: Write>(view: &mut ReviewView, input: R, out: &mut W) -> Result<()> {
    print_status(view, out)?;

    for line in input.lines() {
        let line = line?;
        let Some(parsed) = parse_line(&line) else {
            continue;
        };
        match parsed {
            Ok(ReviewInput::Quit) => break,
            Ok(event) => apply(view, event, out)?,
            Err(message) => writeln!(out, "{message}")?,
        }
        print_status(view, out)?;
    }

    let status = view.status();
    writeln!(
        out,
        "Reviewed {}/{} fields ({}%)",
        status.approved, status.total, status.progress
    )?;
    let sections = section_summary(&view.section_progress());
    if !sections.is_empty() {
        writeln!(out, "{sections}")?;
    }
    Ok(())
}

fn apply<W: Write>(view: &mut ReviewView, input: ReviewInput, out: &mut W) -> Result<()> {
    match input {
        ReviewInput::Key(event) => {
            if view.handle_key(&event).is_none() {
                log::debug!("Key '{}' ignored", event.key);
            }
        }
        ReviewInput::Goto(number) => {
            if !view.jump_to(number - 1) {
                writeln!(out, "no field {number}")?;
            }
        }
        ReviewInput::Search(query) => {
            if !view.palette().is_open() {
                view.apply(ReviewCommand::TogglePalette);
            }
            view.set_search_query(query);
            writeln!(out, "{}", search_text(&view.search_results()))?;
        }
        ReviewInput::Pick(number) => {
            if !view.select_search_result(number - 1) {
                writeln!(out, "no field {number}")?;
            }
        }
        ReviewInput::Section(key) => {
            if view.select_section(&key).is_none() {
                writeln!(out, "no section '{key}'")?;
            }
        }
        ReviewInput::Quit => {}
    }
    Ok(())
}

fn print_status<W: Write>(view: &ReviewView, out: &mut W) -> Result<()> {
    let session = view.session();
    let current = session.current_field();
    let approved = current.is_some_and(|f| session.is_approved(&f.key));
    writeln!(out, "{}", status_line(&view.status(), current, approved))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use review_search::SearchConfig;
    use review_session::AdvancePolicy;
    use serde_json::json;

    fn view() -> ReviewView {
        let product = json!({
            "product_name": "Acme CRM",
            "pricing": {"overview": "Per seat"},
            "year_founded": 2010
        });
        ReviewView::from_product(&product, AdvancePolicy::default(), SearchConfig::default()).unwrap()
    }

    fn run(script: &str) -> Vec<String> {
        let mut v = view();
        let mut out = Vec::new();
        run_review(&mut v, script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn parses_key_names_and_commands() {
        assert_eq!(parse_line("  "), None);
        assert_eq!(
            parse_line("space"),
            Some(Ok(ReviewInput::Key(KeyEvent::new(" "))))
        );
        assert_eq!(
            parse_line("Ctrl+K"),
            Some(Ok(ReviewInput::Key(KeyEvent::new("k").with_ctrl())))
        );
        assert_eq!(parse_line("goto 3"), Some(Ok(ReviewInput::Goto(3))));
        assert_eq!(
            parse_line("search pricing overview"),
            Some(Ok(ReviewInput::Search("pricing overview".into())))
        );
        assert!(matches!(parse_line("goto 0"), Some(Err(_))));
        assert!(matches!(parse_line("dance"), Some(Err(_))));
    }

    #[test]
    fn approving_everything_reports_full_progress() {
        let lines = run("space\nenter\nspace\n");
        assert_eq!(lines[0], "[1/3] Product Name = Acme CRM | 0/3 approved (0%)");
        assert_eq!(lines[1], "[2/3] Pricing > Overview = Per seat | 1/3 approved (33%)");
        assert_eq!(
            lines[3],
            "[3/3] Year Founded = 2010 (approved) | 3/3 approved (100%)"
        );
        assert_eq!(lines[4], "Reviewed 3/3 fields (100%)");
    }

    #[test]
    fn search_and_pick_jump_to_field() {
        let lines = run("search founded\npick 3\nq\nspace\n");
        assert!(lines.iter().any(|l| l == "Year Founded"));
        assert!(lines.iter().any(|l| l == "  [ ] 3. Year Founded"));
        assert!(lines
            .iter()
            .any(|l| l.starts_with("[3/3] Year Founded") && !l.contains("search open")));
        assert_eq!(lines.last().map(String::as_str), Some("  Year Founded 0/1"));
    }

    #[test]
    fn review_keys_are_ignored_while_search_is_open() {
        let lines = run("/\nspace\nescape\nspace\n");
        assert!(lines[1].ends_with("| search open"));
        assert!(lines[2].contains("0/3 approved"));
        assert!(lines[4].contains("1/3 approved"));
    }

    #[test]
    fn bad_input_is_reported_and_review_continues() {
        let lines = run("goto 9\ndance\nj\n");
        assert_eq!(lines[1], "no field 9");
        assert_eq!(lines[3], "unknown input 'dance'");
        assert!(lines[5].starts_with("[2/3]"));
    }
}
