//! Ordered store of slide objects plus the current selection.

use crate::shapes::{PropertyEdit, SerializableColor, SlideObject};
use kurbo::Point;

/// Font sizes offered as one-click presets.
pub const FONT_PRESETS: [f64; 3] = [9.0, 12.0, 14.0];

/// The scene store. Order is z-order: later objects paint on top and win hit tests.
///
/// Objects are addressed by index. Every operation accepts stale or
/// out-of-range indices and treats them as no-ops.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<SlideObject>,
    selected: Option<usize>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// All objects, back to front.
    pub fn objects(&self) -> &[SlideObject] {
        &self.objects
    }

    pub fn get(&self, index: usize) -> Option<&SlideObject> {
        self.objects.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut SlideObject> {
        self.objects.get_mut(index)
    }

    /// Append an object on top. Returns its index.
    pub fn add(&mut self, object: SlideObject) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    /// Append several objects on top, leaving the selection alone.
    pub fn extend(&mut self, objects: impl IntoIterator<Item = SlideObject>) {
        self.objects.extend(objects);
    }

    /// Remove the object at `index`. Clears the selection if it pointed at the
    /// removed object and keeps it on the same object otherwise.
    pub fn remove(&mut self, index: usize) -> Option<SlideObject> {
        if index >= self.objects.len() {
            return None;
        }
        let removed = self.objects.remove(index);
        self.selected = match self.selected {
            Some(sel) if sel == index => None,
            Some(sel) if sel > index => Some(sel - 1),
            other => other,
        };
        Some(removed)
    }

    /// Remove the selected object, if any.
    pub fn remove_selected(&mut self) -> Option<SlideObject> {
        let index = self.selected?;
        self.remove(index)
    }

    /// Set or clear the selection. Out-of-range indices are ignored.
    pub fn select(&mut self, index: Option<usize>) {
        match index {
            Some(i) if i >= self.objects.len() => {}
            other => self.selected = other,
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&SlideObject> {
        self.selected.and_then(|i| self.objects.get(i))
    }

    pub fn selected_mut(&mut self) -> Option<&mut SlideObject> {
        self.selected.and_then(|i| self.objects.get_mut(i))
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected == Some(index)
    }

    /// Replace every object and clear the selection.
    pub fn replace_all(&mut self, objects: Vec<SlideObject>) {
        self.objects = objects;
        self.selected = None;
    }

    /// Remove every object and clear the selection.
    pub fn clear(&mut self) {
        self.replace_all(Vec::new());
    }

    /// Index of the topmost object containing `point` (device space).
    pub fn object_at(&self, point: Point) -> Option<usize> {
        self.objects.iter().rposition(|obj| obj.hit_test(point))
    }

    /// Apply a property edit to the selected object.
    pub fn edit_selected(&mut self, edit: PropertyEdit) -> bool {
        self.selected_mut().is_some_and(|obj| obj.apply(edit))
    }

    /// Apply a font-size preset. Only boxes and text objects take it.
    pub fn apply_font_preset(&mut self, size: f64) -> bool {
        self.edit_selected(PropertyEdit::FontSize(size))
    }

    /// Apply a palette color: font color for objects with text, fill otherwise.
    pub fn apply_palette_color(&mut self, color: SerializableColor) -> bool {
        let Some(obj) = self.selected_mut() else {
            return false;
        };
        if obj.kind().has_text() {
            obj.apply(PropertyEdit::FontColor(color))
        } else {
            obj.apply(PropertyEdit::FillColor(color))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{ArrowDirection, ObjectKind};

    fn boxed(left: f64, top: f64) -> SlideObject {
        SlideObject::new(ObjectKind::boxed(), left, top, 1.0, 0.5)
    }

    #[test]
    fn test_add_appends_on_top() {
        let mut scene = Scene::new();
        assert_eq!(scene.add(boxed(0.0, 0.0)), 0);
        assert_eq!(scene.add(boxed(1.0, 1.0)), 1);
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_topmost_wins() {
        let mut scene = Scene::new();
        let a = boxed(1.0, 1.0);
        let b = boxed(1.2, 1.1);
        let c = boxed(1.4, 1.2);
        let c_id = c.id();
        scene.add(a);
        scene.add(b);
        scene.add(c);
        // Inside all three.
        let hit = scene.object_at(Point::new(1.45 * 96.0, 1.3 * 96.0));
        assert_eq!(hit, Some(2));
        assert_eq!(scene.get(2).map(|o| o.id()), Some(c_id));
    }

    #[test]
    fn test_object_at_miss() {
        let mut scene = Scene::new();
        scene.add(boxed(1.0, 1.0));
        assert_eq!(scene.object_at(Point::new(5.0, 5.0)), None);
    }

    #[test]
    fn test_remove_selected_clears_selection() {
        let mut scene = Scene::new();
        scene.add(boxed(0.0, 0.0));
        let i = scene.add(boxed(2.0, 2.0));
        scene.select(Some(i));
        assert!(scene.remove_selected().is_some());
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.selected_index(), None);
        assert!(scene.remove_selected().is_none());
    }

    #[test]
    fn test_remove_other_keeps_selection_on_same_object() {
        let mut scene = Scene::new();
        scene.add(boxed(0.0, 0.0));
        let keep = scene.add(boxed(2.0, 2.0));
        let id = scene.get(keep).unwrap().id();
        scene.select(Some(keep));
        scene.remove(0);
        assert_eq!(scene.selected().map(|o| o.id()), Some(id));
    }

    #[test]
    fn test_invalid_references_are_noops() {
        let mut scene = Scene::new();
        scene.add(boxed(0.0, 0.0));
        scene.select(Some(0));
        scene.select(Some(7));
        assert_eq!(scene.selected_index(), Some(0));
        assert!(scene.remove(7).is_none());
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_replace_all_clears_selection() {
        let mut scene = Scene::new();
        scene.add(boxed(0.0, 0.0));
        scene.select(Some(0));
        scene.replace_all(vec![boxed(1.0, 1.0), boxed(2.0, 2.0)]);
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.selected_index(), None);
    }

    #[test]
    fn test_extend_keeps_selection() {
        let mut scene = Scene::new();
        scene.add(boxed(0.0, 0.0));
        scene.select(Some(0));
        scene.extend(vec![boxed(1.0, 1.0)]);
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.selected_index(), Some(0));
    }

    #[test]
    fn test_font_preset_only_for_text_kinds() {
        let mut scene = Scene::new();
        let arrow = scene.add(SlideObject::new(
            ObjectKind::arrow(ArrowDirection::Right),
            0.0,
            0.0,
            1.0,
            0.5,
        ));
        scene.select(Some(arrow));
        assert!(!scene.apply_font_preset(FONT_PRESETS[0]));

        let text = scene.add(SlideObject::new(ObjectKind::text(), 0.0, 0.0, 1.0, 0.5));
        scene.select(Some(text));
        assert!(scene.apply_font_preset(FONT_PRESETS[2]));
        assert!((scene.selected().unwrap().font_size - 14.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_palette_color_targets_by_kind() {
        let orange = SerializableColor::rgb(0xED, 0x7D, 0x31);
        let mut scene = Scene::new();
        let b = scene.add(boxed(0.0, 0.0));
        let c = scene.add(SlideObject::new(ObjectKind::Circle, 0.0, 0.0, 1.0, 1.0));

        scene.select(Some(b));
        assert!(scene.apply_palette_color(orange));
        let obj = scene.get(b).unwrap();
        assert_eq!(obj.text_body().unwrap().font_color, orange);
        assert_eq!(obj.fill_color, SerializableColor::white());

        scene.select(Some(c));
        assert!(scene.apply_palette_color(orange));
        assert_eq!(scene.get(c).unwrap().fill_color, orange);
    }

    #[test]
    fn test_clear() {
        let mut scene = Scene::new();
        scene.add(boxed(0.0, 0.0));
        scene.select(Some(0));
        scene.clear();
        assert!(scene.is_empty());
        assert_eq!(scene.selected_index(), None);
    }
}
