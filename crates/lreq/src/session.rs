//! Command dispatch for one player and one entity.
//!
//! Every precondition (target entity, held blueprint, template validity) is
//! checked before the first slot write, so a rejected command leaves the
//! entity untouched.

use lreq_core::{clear_auto_trash, fill_auto_trash, merge};
use lreq_error::{RequestError, Result};
use lreq_slots::SlotAccessor;
use lreq_template::{Template, TemplateCodec, TemplateConfig};
use tracing::{debug_span, info};

use crate::command::{Command, Cursor, Outcome};

/// The state a command runs against: the selected entity, if any, and the
/// player's cursor.
pub struct PlayerSession<'a> {
    pub entity: Option<&'a mut dyn SlotAccessor>,
    pub cursor: &'a mut Cursor,
}

impl<'a> PlayerSession<'a> {
    pub fn new(entity: Option<&'a mut dyn SlotAccessor>, cursor: &'a mut Cursor) -> Self {
        Self { entity, cursor }
    }

    fn entity(&mut self) -> Result<&mut (dyn SlotAccessor + 'a)> {
        match self.entity.as_deref_mut() {
            Some(entity) => Ok(entity),
            None => Err(RequestError::NoTargetEntity),
        }
    }
}

/// Decode the template held in `cursor`.
fn held_template(cursor: &Cursor, codec: &TemplateCodec) -> Result<Template> {
    match cursor {
        Cursor::Blueprint(Some(layout)) => codec.layout_to_slots(layout),
        other => Err(RequestError::invalid_template(format!(
            "holding {}, expected a template blueprint",
            other.describe()
        ))),
    }
}

/// Run `command` against `session`.
///
/// `catalog` lists every item eligible for auto-trash; only
/// [`Command::AutoTrash`] reads it.
pub fn execute(
    command: Command,
    session: &mut PlayerSession<'_>,
    catalog: &[String],
    config: &TemplateConfig,
) -> Result<Outcome> {
    let _span = debug_span!("lreq_command", command = %command).entered();

    let codec = TemplateCodec::new(config.clone());
    let outcome = match command {
        Command::Export => {
            if *session.cursor != Cursor::Blueprint(None) {
                let found = session.cursor.describe();
                // Resolve the entity first so a missing target wins.
                session.entity()?;
                return Err(RequestError::not_empty(found));
            }
            let entity = session.entity()?;
            let written = entity.occupied().len();
            let layout = codec.slots_to_layout(&*entity);
            *session.cursor = Cursor::Blueprint(Some(layout));
            Outcome::new(command, written, 0)
        }
        Command::Import
        | Command::Append
        | Command::Increment
        | Command::Decrement
        | Command::Set => {
            let mode = command
                .merge_mode()
                .ok_or_else(|| RequestError::internal(format!("{command} has no merge mode")))?;
            session.entity()?;
            let template = held_template(&*session.cursor, &codec)?;
            let report = merge(session.entity()?, &template, mode)?;
            Outcome::new(command, report.written, report.cleared)
        }
        Command::AutoTrash => {
            let written = fill_auto_trash(session.entity()?, catalog)?;
            Outcome::new(command, written, 0)
        }
        Command::ClearAutoTrash => {
            let cleared = clear_auto_trash(session.entity()?)?;
            Outcome::new(command, 0, cleared)
        }
        Command::ClearRequests => {
            let cleared = session.entity()?.clear_all()?;
            Outcome::new(command, 0, cleared)
        }
    };

    info!(
        command = %command,
        written = outcome.written,
        cleared = outcome.cleared,
        "command complete"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use lreq_slots::{CharacterSlots, MemorySlots};
    use lreq_types::{CombinatorLayout, Quantity, SlotRequest};

    use super::*;

    fn table() -> CharacterSlots<MemorySlots> {
        let mut memory = MemorySlots::new();
        memory
            .insert(1, SlotRequest::new("coal", Quantity::new(1), Quantity::new(2)))
            .unwrap();
        CharacterSlots::new(memory)
    }

    #[test]
    fn test_missing_entity_is_reported_first() {
        for command in Command::ALL {
            let mut cursor = Cursor::Other("iron-chest".to_owned());
            let mut session = PlayerSession::new(None, &mut cursor);
            let err = execute(command, &mut session, &[], &TemplateConfig::default()).unwrap_err();
            assert!(matches!(err, RequestError::NoTargetEntity), "{command}");
        }
    }

    #[test]
    fn test_export_requires_blank_blueprint() {
        let mut slots = table();
        let mut cursor = Cursor::Empty;
        let mut session = PlayerSession::new(Some(&mut slots), &mut cursor);
        let err = execute(Command::Export, &mut session, &[], &TemplateConfig::default())
            .unwrap_err();
        assert!(matches!(err, RequestError::NotAnEmptyContainer { .. }));
        assert_eq!(cursor, Cursor::Empty);
    }

    #[test]
    fn test_import_with_invalid_layout_leaves_entity_untouched() {
        let mut slots = table();
        let before = slots.occupied();
        let mut cursor = Cursor::Blueprint(Some(CombinatorLayout::default()));
        let mut session = PlayerSession::new(Some(&mut slots), &mut cursor);
        let err = execute(Command::Import, &mut session, &[], &TemplateConfig::default())
            .unwrap_err();
        assert!(matches!(err, RequestError::InvalidTemplate { .. }));
        assert_eq!(slots.occupied(), before);
    }
}
