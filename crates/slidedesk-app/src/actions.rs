//! Applying UI actions and service outcomes to the editor.

use crate::jobs::JobOutcome;
use crate::ui::{Notification, UiAction, UiState};
use slidedesk_core::{Editor, ExternalObject};

/// Work an action leaves for the app shell after the editor has been updated.
#[derive(Debug, Clone, PartialEq)]
pub enum Followup {
    None,
    ExportJson,
    LoadJson(String),
    Screenshot,
    CopyJson,
    SaveJson,
}

/// Apply an action that only touches the editor or UI state, and hand back
/// anything that needs the service, the GPU or the desktop.
pub fn apply_action(editor: &mut Editor, ui_state: &mut UiState, action: UiAction) -> Followup {
    match action {
        UiAction::SetTool(tool) => editor.begin_create(tool),
        UiAction::CancelTool => {
            editor.controller.cancel();
        }
        UiAction::Edit(edit) => {
            editor.edit(edit);
        }
        UiAction::FontPreset(size) => {
            editor.scene.apply_font_preset(size);
        }
        UiAction::Palette(color) => {
            editor.scene.apply_palette_color(color);
        }
        UiAction::DeleteSelected => {
            editor.delete_selected();
        }
        UiAction::ClearAll => editor.clear(),
        UiAction::SetTitle(title) => editor.info.title = title,
        UiAction::SetSubtitle(subtitle) => editor.info.subtitle = subtitle,
        UiAction::AddObjects(text) => add_objects(editor, ui_state, &text),
        UiAction::LoadJson(text) => {
            if text.trim().is_empty() {
                ui_state.notify(Notification::error("Paste slide JSON to load first."));
            } else {
                return Followup::LoadJson(text);
            }
        }
        UiAction::ExportJson => return Followup::ExportJson,
        UiAction::Screenshot => return Followup::Screenshot,
        UiAction::CopyJson => return Followup::CopyJson,
        UiAction::SaveJson => return Followup::SaveJson,
    }
    Followup::None
}

/// Parse a JSON array of editor objects and append them to the slide.
pub fn add_objects_from_json(editor: &mut Editor, text: &str) -> Result<usize, serde_json::Error> {
    let objects: Vec<ExternalObject> = serde_json::from_str(text)?;
    Ok(editor.append_objects(&objects))
}

fn add_objects(editor: &mut Editor, ui_state: &mut UiState, text: &str) {
    if text.trim().is_empty() {
        ui_state.notify(Notification::error("Paste a JSON array of objects first."));
        return;
    }
    match add_objects_from_json(editor, text) {
        Ok(count) => {
            log::info!("added {} objects", count);
            ui_state.notify(Notification::info(format!("Added {count} objects.")));
        }
        Err(e) => {
            log::warn!("add objects failed: {}", e);
            ui_state.notify(Notification::error(format!("Invalid objects JSON: {e}")));
        }
    }
}

/// Fold a finished service call into the editor and UI.
pub fn apply_job_outcome(editor: &mut Editor, ui_state: &mut UiState, outcome: JobOutcome) {
    match outcome {
        JobOutcome::Exported(Ok(exported)) => {
            log::info!("exported {} objects", exported.json.objects.len());
            ui_state.json_output = exported.json_string;
        }
        JobOutcome::Loaded(Ok(document)) => {
            editor.import_document(&document);
            ui_state.notify(Notification::info("JSON loaded."));
        }
        JobOutcome::Screenshot(Ok(saved)) => {
            log::info!("screenshot saved as {} at {}", saved.filename, saved.timestamp);
            ui_state.notify(Notification::info(format!(
                "Screenshot saved: {}",
                saved.filename
            )));
        }
        JobOutcome::Exported(Err(e)) | JobOutcome::Loaded(Err(e)) | JobOutcome::Screenshot(Err(e)) => {
            log::warn!("service call failed: {}", e);
            ui_state.notify(Notification::error(e.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::NotificationKind;
    use slidedesk_core::input::PointerEvent;
    use slidedesk_core::service::ServiceError;
    use slidedesk_core::shapes::{PropertyEdit, SerializableColor};
    use slidedesk_core::{SlideDocument, ToolKind};

    fn editor_with_box() -> Editor {
        let mut editor = Editor::new();
        editor.begin_create(ToolKind::Box);
        editor.pointer(PointerEvent::down(100.0, 100.0));
        editor.pointer(PointerEvent::up(100.0, 100.0));
        editor
    }

    #[test]
    fn test_editor_actions() {
        let mut editor = editor_with_box();
        let mut ui_state = UiState::default();

        let followup = apply_action(
            &mut editor,
            &mut ui_state,
            UiAction::Edit(PropertyEdit::Text("Hello".into())),
        );
        assert_eq!(followup, Followup::None);
        let selected = editor.scene.selected().unwrap();
        assert_eq!(selected.text_body().unwrap().text, "Hello");

        apply_action(&mut editor, &mut ui_state, UiAction::FontPreset(9.0));
        assert!((editor.scene.selected().unwrap().font_size - 9.0).abs() < 1e-9);

        apply_action(
            &mut editor,
            &mut ui_state,
            UiAction::Palette(SerializableColor::rgb(0xED, 0x7D, 0x31)),
        );
        assert_eq!(
            editor.scene.selected().unwrap().text_body().unwrap().font_color,
            SerializableColor::rgb(0xED, 0x7D, 0x31)
        );

        apply_action(&mut editor, &mut ui_state, UiAction::DeleteSelected);
        assert!(editor.scene.is_empty());
    }

    #[test]
    fn test_tool_and_metadata_actions() {
        let mut editor = Editor::new();
        let mut ui_state = UiState::default();

        apply_action(&mut editor, &mut ui_state, UiAction::SetTool(ToolKind::Circle));
        assert_eq!(editor.controller.pending_tool(), Some(ToolKind::Circle));
        apply_action(&mut editor, &mut ui_state, UiAction::CancelTool);
        assert_eq!(editor.controller.pending_tool(), None);

        apply_action(&mut editor, &mut ui_state, UiAction::SetTitle("Plan".into()));
        apply_action(&mut editor, &mut ui_state, UiAction::SetSubtitle("Q3".into()));
        assert_eq!(editor.info.title, "Plan");
        assert_eq!(editor.info.subtitle, "Q3");
    }

    #[test]
    fn test_clear_all() {
        let mut editor = editor_with_box();
        let mut ui_state = UiState::default();
        apply_action(&mut editor, &mut ui_state, UiAction::ClearAll);
        assert!(editor.scene.is_empty());
        assert_eq!(editor.scene.selected_index(), None);
    }

    #[test]
    fn test_service_actions_are_deferred() {
        let mut editor = Editor::new();
        let mut ui_state = UiState::default();
        assert_eq!(
            apply_action(&mut editor, &mut ui_state, UiAction::ExportJson),
            Followup::ExportJson
        );
        assert_eq!(
            apply_action(&mut editor, &mut ui_state, UiAction::LoadJson("{}".into())),
            Followup::LoadJson("{}".into())
        );
        assert_eq!(
            apply_action(&mut editor, &mut ui_state, UiAction::Screenshot),
            Followup::Screenshot
        );
        assert!(ui_state.notification.is_none());
    }

    #[test]
    fn test_empty_load_notifies_without_service_call() {
        let mut editor = Editor::new();
        let mut ui_state = UiState::default();
        let followup = apply_action(&mut editor, &mut ui_state, UiAction::LoadJson("  \n".into()));
        assert_eq!(followup, Followup::None);
        assert_eq!(
            ui_state.notification.as_ref().map(|n| n.kind),
            Some(NotificationKind::Error)
        );
    }

    #[test]
    fn test_add_objects_from_json() {
        let mut editor = Editor::new();
        let added = add_objects_from_json(
            &mut editor,
            r##"[
                {"type": "box", "left": 1, "top": 1, "width": 2, "height": 1, "text": "A"},
                {"type": "arrow", "direction": "down", "left": 4, "top": 1, "width": 0.5, "height": 1},
                {"type": "star"}
            ]"##,
        )
        .unwrap();
        assert_eq!(added, 2);
        assert_eq!(editor.scene.len(), 2);

        assert!(add_objects_from_json(&mut editor, "{\"type\": \"box\"}").is_err());
        assert_eq!(editor.scene.len(), 2);
    }

    #[test]
    fn test_add_objects_action_reports_count() {
        let mut editor = Editor::new();
        let mut ui_state = UiState::default();
        apply_action(
            &mut editor,
            &mut ui_state,
            UiAction::AddObjects(r#"[{"type": "circle", "width": 1, "height": 1}]"#.into()),
        );
        let notification = ui_state.notification.unwrap();
        assert_eq!(notification.kind, NotificationKind::Info);
        assert_eq!(notification.message, "Added 1 objects.");
    }

    #[test]
    fn test_loaded_outcome_replaces_slide() {
        let mut editor = editor_with_box();
        let mut ui_state = UiState::default();
        let document: SlideDocument = serde_json::from_value(serde_json::json!({
            "title": "Loaded",
            "slideIndex": 3,
            "objects": [
                {"type": "line", "left": 1.0, "top": 2.0, "width": 3.0, "height": 0.1},
                {"type": "circle", "left": 5.0, "top": 2.0, "width": 1.0, "height": 1.0}
            ]
        }))
        .unwrap();

        apply_job_outcome(&mut editor, &mut ui_state, JobOutcome::Loaded(Ok(document)));
        assert_eq!(editor.scene.len(), 2);
        assert_eq!(editor.info.title, "Loaded");
        assert_eq!(editor.info.index, 3);
        assert_eq!(editor.scene.selected_index(), None);
        assert_eq!(ui_state.notification.unwrap().message, "JSON loaded.");
    }

    #[test]
    fn test_failed_outcome_keeps_slide() {
        let mut editor = editor_with_box();
        let mut ui_state = UiState::default();
        apply_job_outcome(
            &mut editor,
            &mut ui_state,
            JobOutcome::Loaded(Err(ServiceError::MissingObjects)),
        );
        assert_eq!(editor.scene.len(), 1);
        let notification = ui_state.notification.unwrap();
        assert_eq!(notification.kind, NotificationKind::Error);
        assert_eq!(notification.message, "Document has no objects array");
    }
}
