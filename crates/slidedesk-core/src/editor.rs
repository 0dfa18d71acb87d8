//! Editor state: scene, interaction controller and slide metadata.

use crate::bridge::{self, ExternalObject, SlideDocument};
use crate::controller::{InteractionController, Response, ToolKind};
use crate::input::{KeyCommand, PointerEvent};
use crate::scene::Scene;
use crate::shapes::PropertyEdit;

/// Slide-level metadata carried through export and import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideInfo {
    pub title: String,
    pub subtitle: String,
    pub index: u32,
}

impl Default for SlideInfo {
    fn default() -> Self {
        Self {
            title: String::new(),
            subtitle: String::new(),
            index: 1,
        }
    }
}

/// One independent editor instance.
#[derive(Debug, Clone, Default)]
pub struct Editor {
    pub scene: Scene,
    pub controller: InteractionController,
    pub info: SlideInfo,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a pointer event (slide device coordinates).
    pub fn pointer(&mut self, event: PointerEvent) -> Response {
        self.controller.handle(&mut self.scene, event)
    }

    pub fn begin_create(&mut self, tool: ToolKind) {
        self.controller.begin_create(tool);
    }

    /// Handle a keyboard command. Returns true if the scene changed.
    pub fn key(&mut self, command: KeyCommand) -> bool {
        match command {
            KeyCommand::Cancel => {
                self.controller.cancel();
                false
            }
            KeyCommand::Delete => self.delete_selected(),
        }
    }

    /// Delete the selected object and end any drag on it.
    pub fn delete_selected(&mut self) -> bool {
        match self.scene.remove_selected() {
            Some(removed) => {
                log::debug!("deleted {} {}", removed.kind().name(), removed.id());
                self.controller.cancel();
                true
            }
            None => false,
        }
    }

    /// Remove every object.
    pub fn clear(&mut self) {
        self.scene.clear();
        self.controller.cancel();
    }

    pub fn edit(&mut self, edit: PropertyEdit) -> bool {
        self.scene.edit_selected(edit)
    }

    /// Flatten the slide for the JSON service.
    pub fn export_document(&self) -> SlideDocument {
        bridge::export_document(&self.info.title, &self.info.subtitle, self.info.index, &self.scene)
    }

    /// Replace the slide with an imported document. Selection is cleared.
    pub fn import_document(&mut self, document: &SlideDocument) {
        let objects = bridge::import_objects(&document.objects);
        log::info!(
            "imported {} of {} objects",
            objects.len(),
            document.objects.len()
        );
        self.info = SlideInfo {
            title: document.title.clone(),
            subtitle: document.subtitle.clone(),
            index: document.slide_index,
        };
        self.controller.cancel();
        self.scene.replace_all(objects);
    }

    /// Append objects without clearing the slide. Returns how many were added.
    pub fn append_objects(&mut self, objects: &[ExternalObject]) -> usize {
        let rebuilt = bridge::import_objects(objects);
        let count = rebuilt.len();
        self.scene.extend(rebuilt);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{ArrowDirection, SerializableColor};

    #[test]
    fn test_delete_selected() {
        let mut editor = Editor::new();
        editor.begin_create(ToolKind::Box);
        editor.pointer(PointerEvent::down(50.0, 50.0));
        editor.begin_create(ToolKind::Circle);
        editor.pointer(PointerEvent::down(300.0, 300.0));
        assert_eq!(editor.scene.len(), 2);

        assert!(editor.key(KeyCommand::Delete));
        assert_eq!(editor.scene.len(), 1);
        assert_eq!(editor.scene.selected_index(), None);
        assert!(!editor.delete_selected());
    }

    #[test]
    fn test_delete_during_drag_ends_drag() {
        let mut editor = Editor::new();
        editor.begin_create(ToolKind::Box);
        editor.pointer(PointerEvent::down(50.0, 50.0));
        editor.pointer(PointerEvent::down(60.0, 60.0));
        editor.delete_selected();
        let response = editor.pointer(PointerEvent::moved(200.0, 200.0));
        assert!(!response.changed);
    }

    #[test]
    fn test_export_arrow_left() {
        let mut editor = Editor::new();
        editor.begin_create(ToolKind::Arrow(ArrowDirection::Left));
        editor.pointer(PointerEvent::down(96.0, 96.0));
        let doc = editor.export_document();
        assert_eq!(doc.objects[0].kind, "arrow");
        assert_eq!(doc.objects[0].direction.as_deref(), Some("left"));
        assert_eq!(doc.slide_index, 1);
    }

    #[test]
    fn test_import_replaces_and_clears_selection() {
        let mut editor = Editor::new();
        editor.begin_create(ToolKind::Box);
        editor.pointer(PointerEvent::down(50.0, 50.0));

        let document = SlideDocument {
            title: "Roadmap".into(),
            subtitle: "Q3".into(),
            slide_index: 2,
            objects: vec![
                ExternalObject {
                    kind: "circle".into(),
                    width: 0.5,
                    height: 0.5,
                    ..Default::default()
                },
                ExternalObject {
                    kind: "text".into(),
                    text: Some("hello".into()),
                    ..Default::default()
                },
            ],
        };
        editor.import_document(&document);
        assert_eq!(editor.scene.len(), 2);
        assert_eq!(editor.scene.selected_index(), None);
        assert_eq!(editor.info.title, "Roadmap");
        assert_eq!(editor.info.index, 2);
    }

    #[test]
    fn test_append_objects_keeps_existing() {
        let mut editor = Editor::new();
        editor.begin_create(ToolKind::Box);
        editor.pointer(PointerEvent::down(50.0, 50.0));
        let added = editor.append_objects(&[ExternalObject {
            kind: "line".into(),
            fill_color: Some("#404040".into()),
            ..Default::default()
        }]);
        assert_eq!(added, 1);
        assert_eq!(editor.scene.len(), 2);
        assert_eq!(editor.scene.selected_index(), Some(0));
        assert_eq!(
            editor.scene.get(1).unwrap().fill_color,
            SerializableColor::rgb(0x40, 0x40, 0x40)
        );
    }

    #[test]
    fn test_clear() {
        let mut editor = Editor::new();
        editor.begin_create(ToolKind::Text);
        editor.pointer(PointerEvent::down(50.0, 50.0));
        editor.clear();
        assert!(editor.scene.is_empty());
    }
}
