use tracing::debug;

use tecla_core::{collect_variants, plan_edit, FunctionalEntry, KeyPos};

use super::types::{SessionResponse, SurfaceAction};
use super::KeyboardSession;

/// One selectable option on an open variant surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceOption {
    pub entry: FunctionalEntry,
    pub display_text: String,
}

/// The long-press selection surface. At most one is open per session.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantSurface {
    pub anchor: KeyPos,
    pub options: Vec<SurfaceOption>,
}

impl VariantSurface {
    pub fn labels(&self) -> Vec<String> {
        self.options.iter().map(|o| o.display_text.clone()).collect()
    }
}

impl KeyboardSession {
    /// Open the variant surface for `key`, replacing any open one. A key
    /// without variants leaves everything as it is.
    pub(crate) fn fire_long_press(&mut self, key: KeyPos, resp: &mut SessionResponse) {
        let options: Vec<SurfaceOption> = match self.key(key) {
            Ok(k) => collect_variants(k)
                .into_iter()
                .map(|v| SurfaceOption {
                    entry: v.entry.clone(),
                    display_text: v.display_text,
                })
                .collect(),
            Err(_) => Vec::new(),
        };
        if options.is_empty() {
            debug!(%key, "long-press with no variants");
            return;
        }

        let surface = VariantSurface {
            anchor: key,
            options,
        };
        resp.surface = SurfaceAction::Show {
            anchor: key,
            options: surface.labels(),
        };
        self.surface = Some(surface);
    }

    /// Dismiss the surface if one is open.
    pub(crate) fn dismiss_surface(&mut self, resp: &mut SessionResponse) {
        if self.surface.take().is_some() {
            resp.surface = SurfaceAction::Hide;
        }
    }

    /// A press-down elsewhere closes the surface unless it lands on the
    /// surface's own anchor key.
    pub(crate) fn press_down_elsewhere(&mut self, key: Option<KeyPos>, resp: &mut SessionResponse) {
        let on_anchor = matches!((&self.surface, key), (Some(s), Some(k)) if s.anchor == k);
        if !on_anchor {
            self.dismiss_surface(resp);
        }
    }

    pub(crate) fn select_variant(&mut self, index: usize, resp: &mut SessionResponse) {
        let Some(option) = self.surface.as_ref().and_then(|s| s.options.get(index)) else {
            debug!(index, "variant selection without matching option");
            resp.consumed = false;
            return;
        };
        if let Some(op) = plan_edit(Some(&option.entry), &option.display_text) {
            resp.edits.push(op);
        }
        self.dismiss_surface(resp);
    }
}
