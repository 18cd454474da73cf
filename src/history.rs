//! History tokens: the URL-equivalent application state.
//!
//! Text form: `/{id}/{name}[/{kind}/{selection}[/{anchor}]][/{action}]`,
//! e.g. `/1f/Budget/cell/B2:C3/bottom-right/menu`.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SheetviewError};
use crate::types::{AnchoredSelection, Selection, SpreadsheetId};

/// What the user is doing with the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenAction {
    #[default]
    None,
    /// Context menu open on the selection.
    Menu,
    /// Find dialog open.
    Find,
}

impl TokenAction {
    fn segment(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Menu => Some("menu"),
            Self::Find => Some("find"),
        }
    }

    fn parse(segment: &str) -> Option<Self> {
        match segment {
            "menu" => Some(Self::Menu),
            "find" => Some(Self::Find),
            _ => None,
        }
    }
}

/// Current spreadsheet, selection and action.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HistoryToken {
    pub spreadsheet: Option<(SpreadsheetId, String)>,
    pub selection: Option<AnchoredSelection>,
    pub action: TokenAction,
}

impl HistoryToken {
    pub fn spreadsheet(id: SpreadsheetId, name: &str) -> Self {
        Self {
            spreadsheet: Some((id, name.to_string())),
            selection: None,
            action: TokenAction::None,
        }
    }

    pub fn spreadsheet_id(&self) -> Option<SpreadsheetId> {
        self.spreadsheet.as_ref().map(|(id, _)| *id)
    }

    /// Same spreadsheet, new selection, action cleared.
    #[must_use]
    pub fn with_selection(&self, selection: Option<AnchoredSelection>) -> Self {
        Self {
            spreadsheet: self.spreadsheet.clone(),
            selection,
            action: TokenAction::None,
        }
    }

    #[must_use]
    pub fn with_action(&self, action: TokenAction) -> Self {
        Self {
            action,
            ..self.clone()
        }
    }
}

fn escape(name: &str) -> String {
    name.replace('%', "%25").replace('/', "%2F")
}

fn unescape(name: &str) -> String {
    name.replace("%2F", "/").replace("%25", "%")
}

impl fmt::Display for HistoryToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((id, name)) = &self.spreadsheet else {
            return f.write_str("/");
        };
        write!(f, "/{id}/{}", escape(name))?;
        if let Some(selection) = &self.selection {
            write!(f, "/{}/{}", selection.selection.kind(), selection.selection)?;
            if selection.anchor != selection.selection.default_anchor() {
                write!(f, "/{}", selection.anchor)?;
            }
        }
        if let Some(action) = self.action.segment() {
            write!(f, "/{action}")?;
        }
        Ok(())
    }
}

impl FromStr for HistoryToken {
    type Err = SheetviewError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |why: &str| SheetviewError::HistoryToken(format!("{s:?}: {why}"));
        let mut segments = s
            .trim_start_matches('#')
            .split('/')
            .filter(|segment| !segment.is_empty())
            .peekable();

        let Some(id) = segments.next() else {
            return Ok(Self::default());
        };
        let id = u64::from_str_radix(id, 16).map_err(|_| invalid("spreadsheet id"))?;
        let name = segments.next().map(unescape).unwrap_or_default();
        let mut token = Self::spreadsheet(SpreadsheetId(id), &name);

        if let Some(kind) = segments.next_if(|segment| TokenAction::parse(segment).is_none()) {
            let text = segments.next().ok_or_else(|| invalid("missing selection"))?;
            let selection: Selection = text.parse()?;
            if selection.kind() != kind {
                return Err(invalid("selection kind mismatch"));
            }
            let anchor = match segments.next_if(|segment| TokenAction::parse(segment).is_none()) {
                Some(anchor) => anchor.parse()?,
                None => selection.default_anchor(),
            };
            token.selection = Some(AnchoredSelection::new(selection, anchor));
        }

        if let Some(action) = segments.next() {
            token.action = TokenAction::parse(action).ok_or_else(|| invalid("unknown action"))?;
        }
        if segments.next().is_some() {
            return Err(invalid("trailing segments"));
        }
        Ok(token)
    }
}
