use country_lookup::{CountryCard, ResultState};
use std::time::Duration;

/// What a piece of report text is; each kind has one SGR sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Heading,
    Rule,
    Name,
    Code,
    Value,
    Muted,
    Warning,
    Failure,
    Timing,
}

impl Style {
    fn sgr(self) -> &'static str {
        match self {
            Style::Heading => "1;36",
            Style::Rule => "90",
            Style::Name => "1;32",
            Style::Code => "33",
            Style::Value => "34",
            Style::Muted => "2",
            Style::Warning => "1;33",
            Style::Failure => "31",
            Style::Timing => "32",
        }
    }
}

struct Palette {
    enabled: bool,
}

impl Palette {
    fn paint(&self, style: Style, s: impl AsRef<str>) -> String {
        if self.enabled {
            format!("\x1b[{}m{}\x1b[0m", style.sgr(), s.as_ref())
        } else {
            s.as_ref().to_string()
        }
    }
}

pub fn print_result(query: &str, state: &ResultState, cards: &[CountryCard], elapsed: Duration, color: bool) {
    let palette = Palette { enabled: color };
    println!("\n{}", palette.paint(Style::Heading, format!("Search: \"{}\"", query)));

    println!("\n{}", palette.paint(Style::Rule, "━━━ Results ━━━"));
    match state {
        ResultState::Empty => println!("{}", palette.paint(Style::Muted, "  No countries found")),
        ResultState::Blocked => {
            println!("  {}", palette.paint(Style::Warning, "Search blocked"));
            println!("  {}", palette.paint(Style::Muted, "This term is on the denylist; no request was sent."));
        }
        ResultState::Error(message) => println!("  {}", palette.paint(Style::Failure, message)),
        ResultState::Loaded(_) if cards.is_empty() => println!("{}", palette.paint(Style::Muted, "  No countries found")),
        ResultState::Loaded(_) => {
            for (idx, card) in cards.iter().enumerate() {
                print_card(idx, card, &palette);
            }
        }
    }

    println!("\n{}", palette.paint(Style::Rule, "━━━ Timing ━━━"));
    println!("  Total: {}", palette.paint(Style::Timing, format!("{:?}", elapsed)));
    println!();
}

fn print_card(idx: usize, card: &CountryCard, palette: &Palette) {
    println!(
        "  {} {} {} {}",
        palette.paint(Style::Rule, format!("[{}]", idx)),
        palette.paint(Style::Name, &card.name),
        palette.paint(Style::Muted, "│"),
        palette.paint(Style::Code, &card.key),
    );

    let currency = match &card.currency {
        Some(c) => match &c.symbol {
            Some(symbol) => format!("{} ({}, {})", c.name, c.code, symbol),
            None => format!("{} ({})", c.name, c.code),
        },
        None => "-".to_string(),
    };

    let rows = [
        ("capital", card.capital.as_str()),
        ("region", card.region.as_str()),
        ("population", card.population.as_str()),
        ("timezone", card.timezone.as_str()),
        ("local time", card.local_time.as_str()),
        ("currency", currency.as_str()),
        ("flag", card.flag_url.as_str()),
    ];
    for (label, value) in rows {
        println!("      {} {}", palette.paint(Style::Muted, format!("{label:>10}:")), palette.paint(Style::Value, value));
    }
    println!("      {} {}", palette.paint(Style::Muted, format!("{:>10}:", "flag alt")), palette.paint(Style::Muted, &card.flag_alt));
}
