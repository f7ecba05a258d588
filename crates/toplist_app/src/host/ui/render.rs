use chrono::{DateTime, Utc};
use toplist_core::{
    AppViewModel, PageEntry, PickerView, Repository, ResultListView, ResultsView, StatisticsView,
};

const DAYS_PER_YEAR: f64 = 365.25;

pub fn render(view: &AppViewModel, now: DateTime<Utc>) -> Vec<String> {
    let mut lines = Vec::new();

    match view.statistics {
        StatisticsView::Loading => lines.push("Statistics: loading...".to_string()),
        StatisticsView::Ready {
            repo_count,
            star_count,
        } => lines.push(format!(
            "Statistics: storing information about {} repositories with {} stars combined",
            humanize_number(repo_count),
            humanize_number(star_count)
        )),
        StatisticsView::Hidden => {}
    }

    if let Some(picker) = &view.picker {
        lines.push(render_picker(picker));
    }

    match &view.results {
        ResultsView::Loading => lines.push("Results: loading...".to_string()),
        ResultsView::Error(detail) => {
            lines.push("Error".to_string());
            lines.push(format!("  {detail}"));
        }
        ResultsView::Loaded(list) => render_results(list, now, &mut lines),
    }

    lines
}

fn render_picker(picker: &PickerView) -> String {
    let selected = picker
        .options
        .iter()
        .find(|option| option.escaped_name == picker.selected)
        .map_or("All languages", |option| option.label.as_str());
    format!(
        "Language: [{selected}] ({} to choose from)",
        picker.options.len()
    )
}

fn render_results(list: &ResultListView, now: DateTime<Utc>, lines: &mut Vec<String>) {
    lines.push(format!("Results: {}", list.title));
    for (index, repo) in list.repositories.iter().enumerate() {
        lines.push(format_repository(index + 1, repo, now));
    }
    lines.push(format_strip(list));
}

fn format_repository(position: usize, repo: &Repository, now: DateTime<Utc>) -> String {
    let mut line = format!(
        "{position:>3}. \u{2605}{:<7} {}/{}",
        repo.stargazers, repo.owner_login, repo.name
    );
    if !repo.description.is_empty() {
        line.push_str(" - ");
        line.push_str(&repo.description);
    }
    if !repo.homepage.is_empty() {
        line.push_str(" - ");
        line.push_str(&repo.homepage);
    }

    let mut badges = Vec::new();
    if !repo.language.is_empty() {
        badges.push(repo.language.clone());
    }
    if repo.archived {
        badges.push("Archived".to_string());
    }
    if let Some(days) = days_since(repo.pushed_at.as_deref(), now) {
        badges.extend(last_push_badge(days));
    }
    if let Some(days) = days_since(repo.created_at.as_deref(), now) {
        badges.push(age_badge(days));
    }
    if !repo.license.is_empty() && repo.license != "NOASSERTION" {
        badges.push(repo.license.clone());
    }
    if !badges.is_empty() {
        line.push_str(" [");
        line.push_str(&badges.join("] ["));
        line.push(']');
    }
    line
}

fn format_strip(list: &ResultListView) -> String {
    let parts: Vec<String> = list
        .pagination
        .iter()
        .map(|link| match link.entry {
            PageEntry::Prev { enabled, .. } => label("Previous", enabled),
            PageEntry::Next { enabled, .. } => label("Next", enabled),
            PageEntry::Page {
                number,
                is_current: true,
            } => format!("[{number}]"),
            PageEntry::Page { number, .. } => number.to_string(),
            PageEntry::Ellipsis => "\u{2026}".to_string(),
        })
        .collect();
    parts.join(" ")
}

fn label(text: &str, enabled: bool) -> String {
    if enabled {
        text.to_string()
    } else {
        format!("({text})")
    }
}

fn days_since(timestamp: Option<&str>, now: DateTime<Utc>) -> Option<f64> {
    let then = DateTime::parse_from_rfc3339(timestamp?).ok()?;
    let seconds = now.signed_duration_since(then.with_timezone(&Utc)).num_seconds();
    Some(seconds as f64 / 86_400.0)
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn last_push_badge(days: f64) -> Option<String> {
    let years = days / DAYS_PER_YEAR;
    (years >= 1.0).then(|| format!("Last push {} years ago", round_to_tenth(years)))
}

fn age_badge(days: f64) -> String {
    let years = days / DAYS_PER_YEAR;
    if years > 1.0 {
        format!("{} years old", round_to_tenth(years))
    } else {
        format!("{} months old", (years * 12.0).round())
    }
}

/// Short human form with three significant digits: `9876`, `12.3 thousand`,
/// `1.23 million`. Rounding up to 1000 moves on to the next suffix.
pub fn humanize_number(value: u64) -> String {
    const SUFFIXES: [&str; 5] = ["", " thousand", " million", " billion", " trillion"];

    let digits = value.to_string().len();
    if digits <= 4 {
        return value.to_string();
    }
    let mut suffix_index = ((digits - 1) / 3).min(SUFFIXES.len() - 1);
    let mut rounded = round_significant(value as f64 / 10f64.powi(3 * suffix_index as i32));
    if rounded >= 1000.0 && suffix_index + 1 < SUFFIXES.len() {
        suffix_index += 1;
        rounded /= 1000.0;
    }
    let decimals = decimals_for(rounded);
    format!("{rounded:.decimals$}{}", SUFFIXES[suffix_index])
}

fn decimals_for(value: f64) -> usize {
    let magnitude = value.log10().floor() as i32;
    (2 - magnitude).max(0) as usize
}

fn round_significant(value: f64) -> f64 {
    let factor = 10f64.powi(decimals_for(value) as i32);
    (value * factor).round() / factor
}
