use std::path::Path;

use serde::Serialize;

use tecla_core::codepoint;
use tecla_core::{plan_edit, resolve_modes, KeyPos, LayoutDocument, ModeSource};
use tecla_session::{KeyboardSession, SessionConfig};

use crate::render::{format_grid, visible};
use crate::script::{describe_edit, parse_script, ScriptRunner};

fn open_document(file: &str) -> LayoutDocument {
    die!(
        LayoutDocument::open(Path::new(file)),
        "Error loading {file}: {}"
    )
}

fn open_session(file: &str, design: Option<usize>) -> KeyboardSession {
    let mut config = SessionConfig::default();
    if let Some(design) = design {
        config.design = design;
    }
    die!(
        KeyboardSession::from_document(open_document(file), config),
        "Error: {}"
    )
}

fn print_json<T: Serialize>(value: &T) {
    println!("{}", die!(serde_json::to_string_pretty(value), "Error: {}"));
}

fn source_name(source: ModeSource) -> &'static str {
    match source {
        ModeSource::Explicit => "explicit",
        ModeSource::Inferred => "inferred",
        ModeSource::Modeless => "modeless",
    }
}

// --- render ---

#[derive(Serialize)]
struct RenderedKey {
    row: usize,
    slot: usize,
    label: String,
}

pub fn render(file: &str, design: Option<usize>, mode: Option<i64>, json: bool) {
    let mut session = open_session(file, design);
    if let Some(mode) = mode {
        die!(session.switch_mode(mode), "Error: {}");
    }
    let labels = session.labels();

    if json {
        let rows: Vec<Vec<RenderedKey>> = labels
            .into_iter()
            .enumerate()
            .map(|(row, keys)| {
                keys.into_iter()
                    .enumerate()
                    .map(|(slot, label)| RenderedKey { row, slot, label })
                    .collect()
            })
            .collect();
        print_json(&rows);
        return;
    }

    println!(
        "{} ({} keys, mode {})",
        session.design().name.as_deref().unwrap_or("(unnamed)"),
        session.grid().key_count(),
        session.active_mode()
    );
    print!("{}", format_grid(&labels));
}

// --- modes ---

#[derive(Serialize)]
struct ModeRow {
    id: i64,
    name: String,
}

#[derive(Serialize)]
struct ModesReport {
    source: &'static str,
    modes: Vec<ModeRow>,
}

pub fn modes(file: &str, design: Option<usize>, json: bool) {
    let session = open_session(file, design);
    let set = session.modes();
    let report = ModesReport {
        source: source_name(set.source()),
        modes: set
            .modes()
            .iter()
            .map(|m| ModeRow {
                id: m.id,
                name: m.name.clone(),
            })
            .collect(),
    };

    if json {
        print_json(&report);
        return;
    }
    println!("Modes: {}", report.source);
    for m in &report.modes {
        println!("  {:>3}  {}", m.id, m.name);
    }
}

// --- designs ---

#[derive(Serialize)]
struct DesignRow {
    index: usize,
    name: Option<String>,
    keys: usize,
    modes: &'static str,
    mode_count: usize,
}

pub fn designs(file: &str, json: bool) {
    let doc = open_document(file);
    let rows: Vec<DesignRow> = doc
        .designs()
        .iter()
        .enumerate()
        .map(|(index, design)| {
            let set = resolve_modes(design);
            DesignRow {
                index,
                name: design.name.clone(),
                keys: design.keys.len(),
                modes: source_name(set.source()),
                mode_count: set.modes().len(),
            }
        })
        .collect();

    if json {
        print_json(&rows);
        return;
    }
    for row in &rows {
        println!(
            "{:>3}  {:<24} {:>4} keys  {} modes ({})",
            row.index,
            row.name.as_deref().unwrap_or("(unnamed)"),
            row.keys,
            row.mode_count,
            row.modes
        );
    }
}

// --- variants ---

#[derive(Serialize)]
struct VariantRow {
    index: usize,
    display: String,
    action: String,
}

pub fn variants(file: &str, design: Option<usize>, row: usize, slot: usize, json: bool) {
    let session = open_session(file, design);
    let variants = die!(session.variants(KeyPos::new(row, slot)), "Error: {}");
    let rows: Vec<VariantRow> = variants
        .iter()
        .enumerate()
        .map(|(index, v)| VariantRow {
            index,
            display: v.display_text.clone(),
            action: plan_edit(Some(v.entry), &v.display_text)
                .map(|op| describe_edit(&op))
                .unwrap_or_else(|| "none".to_string()),
        })
        .collect();

    if json {
        print_json(&rows);
        return;
    }
    if rows.is_empty() {
        println!("(no variants)");
        return;
    }
    for v in &rows {
        println!("{:>3}  {:<12} {}", v.index, visible(&v.display), v.action);
    }
}

// --- type ---

pub fn type_script(file: &str, design: Option<usize>, script: &str) {
    let steps = die!(parse_script(script), "Error: {}");
    let mut session = open_session(file, design);
    let typed = die!(ScriptRunner::new(&mut session).run(&steps), "Error: {}");
    println!("{typed:?}");
}

// --- decode ---

pub fn decode(payloads: &[String], codepoints: bool) {
    for payload in payloads {
        let text = codepoint::decode(payload);
        if codepoints {
            let cps: Vec<String> = text.chars().map(|c| format!("U+{:04X}", c as u32)).collect();
            println!("{payload}\t{}\t{}", visible(&text), cps.join(" "));
        } else {
            println!("{payload}\t{}", visible(&text));
        }
    }
}
