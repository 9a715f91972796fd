// SPDX-License-Identifier: GPL-3.0-only

use super::{DetailPage, DexApp, ListPage, Loadable, Page};
use crate::entities::{ENGLISH, Pokemon};
use crate::fl;
use crate::utils::{capitalize_string, dex_number, scale_numbers};

const WIDTH: usize = 60;
const STAT_BAR_WIDTH: usize = 20;
const MAX_BASE_STAT: f64 = 255.0;

impl DexApp {
    /// Renders the mounted page as terminal text
    pub fn view(&self) -> String {
        let mut lines = Vec::new();

        lines.push(self.header());
        lines.push(rule());

        match &self.page {
            Page::List(page) => list_body(page, &mut lines),
            Page::Detail(page) => detail_body(page, &mut lines),
        }

        lines.push(rule());
        lines.push(self.footer());
        lines.join("\n")
    }

    fn header(&self) -> String {
        let title = fl!("app-title");
        if self.can_back() {
            spread(&button('b', &fl!("back"), true), &title, "")
        } else {
            spread("", &title, "")
        }
    }

    fn footer(&self) -> String {
        let title = match &self.page {
            Page::Detail(page) => page
                .pokemon
                .ready()
                .map(|pokemon| capitalize_string(&pokemon.name))
                .unwrap_or_default(),
            Page::List(_) => String::new(),
        };

        spread(
            &button('p', &fl!("prev"), self.can_previous()),
            &title,
            &button('n', &fl!("next"), self.can_next()),
        )
    }
}

fn list_body(page: &ListPage, lines: &mut Vec<String>) {
    match &page.listing {
        Loadable::Loading => return lines.push(fl!("loading")),
        Loadable::Failed => return lines.push(fl!("list-error")),
        Loadable::Ready(_) => {}
    }

    for (index, card) in page.cards.iter().enumerate() {
        let number = index + 1;
        let line = match card {
            Loadable::Loading => fl!("loading"),
            Loadable::Failed => fl!("card-error"),
            Loadable::Ready(pokemon) => card_line(pokemon),
        };
        lines.push(format!("{number:>3}. {line}"));
    }
}

fn card_line(pokemon: &Pokemon) -> String {
    let types = pokemon
        .type_names()
        .iter()
        .map(|name| capitalize_string(name))
        .collect::<Vec<_>>()
        .join("/");
    let sprite = pokemon
        .card_sprite()
        .map(str::to_string)
        .unwrap_or_else(|| fl!("no-sprite"));

    format!(
        "{:<16} {}  {:<16} {}",
        capitalize_string(&pokemon.name),
        dex_number(pokemon.id),
        types,
        sprite
    )
}

fn detail_body(page: &DetailPage, lines: &mut Vec<String>) {
    let pokemon = match &page.pokemon {
        Loadable::Loading => return lines.push(fl!("loading")),
        Loadable::Failed => return lines.push(fl!("pokemon-error")),
        Loadable::Ready(pokemon) => pokemon,
    };

    let gender = if pokemon.has_gender_differences() {
        fl!("gender-split")
    } else {
        fl!("gender-both")
    };
    lines.push(format!(
        "{} {}  {gender}",
        capitalize_string(&pokemon.name),
        dex_number(pokemon.id)
    ));
    lines.push(match pokemon.artwork_sprite() {
        Some(url) => fl!("sprite", url = url),
        None => fl!("no-sprite"),
    });
    lines.push(format!(
        "{}   {}",
        fl!("height", meters = scale_numbers(pokemon.height)),
        fl!("weight", kilograms = scale_numbers(pokemon.weight))
    ));

    // a failed species lookup hides the panel
    if let Some(species) = page.species.ready() {
        if let Some(genus) = species.genus(ENGLISH) {
            lines.push(genus.to_string());
        }
        if let Some(flavor) = species.flavor_text(ENGLISH) {
            lines.push(flavor);
        }
    }

    lines.push(String::new());
    let types = pokemon
        .type_names()
        .iter()
        .map(|name| capitalize_string(name))
        .collect::<Vec<_>>()
        .join(", ");
    lines.push(format!("{}: {types}", fl!("types")));

    let weaknesses = match &page.weaknesses {
        Loadable::Loading => fl!("weaknesses-loading"),
        Loadable::Failed => fl!("weaknesses-unavailable"),
        Loadable::Ready(weaknesses) if weaknesses.is_empty() => fl!("no-weaknesses"),
        Loadable::Ready(weaknesses) => weaknesses
            .iter()
            .map(|name| capitalize_string(name))
            .collect::<Vec<_>>()
            .join(", "),
    };
    lines.push(format!("{}: {weaknesses}", fl!("weaknesses")));

    lines.push(String::new());
    lines.push(fl!("base-stats"));
    for stat in &pokemon.stats {
        lines.push(format!(
            "  {:<16} {:>3}  {}",
            capitalize_string(&stat.stat.name),
            stat.base_stat,
            stat_bar(stat.base_stat, STAT_BAR_WIDTH)
        ));
    }
    lines.push(format!("  {:<16} {:>3}", fl!("total-stats"), pokemon.total_stats()));

    lines.push(String::new());
    lines.push(fl!("abilities"));
    for ability in &pokemon.abilities {
        let name = capitalize_string(&ability.ability.name);
        if ability.is_hidden {
            lines.push(format!("  {}", fl!("hidden-ability", name = name)));
        } else {
            lines.push(format!("  {name}"));
        }
    }
}

/// Bar filled in proportion to `min(base / 255, 1)`
pub fn stat_bar(base_stat: i64, width: usize) -> String {
    let ratio = (base_stat as f64 / MAX_BASE_STAT).clamp(0.0, 1.0);
    let filled = (ratio * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn button(key: char, label: &str, enabled: bool) -> String {
    if enabled {
        format!("[{key}] {label}")
    } else {
        format!("[ ] {label}")
    }
}

fn rule() -> String {
    "─".repeat(WIDTH)
}

/// Lays out three parts on one line: left aligned, centered, right aligned
fn spread(left: &str, center: &str, right: &str) -> String {
    let width = |s: &str| s.chars().count();
    let center_start = (WIDTH.saturating_sub(width(center))) / 2;
    let left_gap = center_start.saturating_sub(width(left)).max(1);
    let right_gap = WIDTH
        .saturating_sub(width(left) + left_gap + width(center) + width(right))
        .max(1);

    format!(
        "{left}{}{center}{}{right}",
        " ".repeat(left_gap),
        " ".repeat(right_gap)
    )
    .trim_end()
    .to_string()
}
