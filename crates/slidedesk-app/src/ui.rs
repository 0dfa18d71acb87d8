//! egui panels around the slide.

use egui::{Align2, Color32, Context, Pos2, RichText, Vec2};
use slidedesk_core::scene::FONT_PRESETS;
use slidedesk_core::shapes::{HAlign, ObjectKind, PropertyEdit, SerializableColor, SlideObject, VAlign};
use slidedesk_core::{SlideInfo, ToolKind};
use slidedesk_widgets::{
    FontSizeButton, ToggleButton, palette_row, panel_frame, section_label, separator,
    theme, toolbar_frame,
};

use crate::shortcuts::SHORTCUTS;

/// Actions triggered by the UI, applied by the app after the frame.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    /// Arm a creation tool; the next click on the slide places the object.
    SetTool(ToolKind),
    CancelTool,
    Edit(PropertyEdit),
    FontPreset(f64),
    Palette(SerializableColor),
    DeleteSelected,
    /// Remove every object (already confirmed by the user).
    ClearAll,
    SetTitle(String),
    SetSubtitle(String),
    ExportJson,
    CopyJson,
    SaveJson,
    LoadJson(String),
    /// Append a JSON array of editor objects.
    AddObjects(String),
    Screenshot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Error,
}

/// A blocking message shown until dismissed.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

/// UI-only state kept between frames.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Last exported canonical JSON (read-only view).
    pub json_output: String,
    /// User-supplied canonical JSON to load.
    pub json_input: String,
    /// User-supplied editor objects to append.
    pub objects_input: String,
    pub notification: Option<Notification>,
    pub confirm_clear_open: bool,
    /// A service call is in flight.
    pub busy: bool,
}

impl UiState {
    pub fn notify(&mut self, notification: Notification) {
        self.notification = Some(notification);
    }
}

/// Read-only view of the editor for one frame.
pub struct EditorView<'a> {
    pub selected: Option<&'a SlideObject>,
    pub pending_tool: Option<ToolKind>,
    pub info: &'a SlideInfo,
    pub object_count: usize,
}

/// Render all panels and return any triggered action.
pub fn render_ui(ctx: &Context, ui_state: &mut UiState, view: &EditorView) -> Option<UiAction> {
    let toolbar_action = render_toolbar(ctx, ui_state, view);
    let json_action = render_json_panel(ctx, ui_state);
    let properties_action = render_properties_panel(ctx, view);

    let modal_action = if ui_state.notification.is_some() {
        render_notification(ctx, ui_state);
        None
    } else if ui_state.confirm_clear_open {
        render_confirm_clear(ctx, ui_state)
    } else {
        None
    };

    toolbar_action.or(properties_action).or(json_action).or(modal_action)
}

fn to_color32(color: SerializableColor) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}

/// Top bar: creation tools, delete and clear.
fn render_toolbar(ctx: &Context, ui_state: &mut UiState, view: &EditorView) -> Option<UiAction> {
    let mut action = None;

    egui::TopBottomPanel::top("toolbar")
        .frame(toolbar_frame())
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing = Vec2::new(4.0, 0.0);
                for tool in ToolKind::ALL {
                    let armed = view.pending_tool == Some(tool);
                    if ToggleButton::new(tool.label(), armed)
                        .min_width(56.0)
                        .tooltip("Click, then click on the slide")
                        .show(ui)
                    {
                        action = Some(if armed {
                            UiAction::CancelTool
                        } else {
                            UiAction::SetTool(tool)
                        });
                    }
                }

                ui.add_space(16.0);
                if view.selected.is_some() && ToggleButton::new("Delete", false).show(ui) {
                    action = Some(UiAction::DeleteSelected);
                }
                if view.object_count > 0 && ToggleButton::new("Clear all", false).show(ui) {
                    ui_state.confirm_clear_open = true;
                }

                ui.add_space(16.0);
                let status = match view.pending_tool {
                    Some(tool) => format!("Click on the slide to place: {}", tool.label()),
                    None => format!("{} objects", view.object_count),
                };
                ui.label(RichText::new(status).size(12.0).color(theme::TEXT_MUTED));
            });
        });

    action
}

/// Right panel: slide metadata and the selected object's properties.
fn render_properties_panel(ctx: &Context, view: &EditorView) -> Option<UiAction> {
    let mut action = None;

    egui::SidePanel::right("properties")
        .resizable(false)
        .exact_width(270.0)
        .frame(panel_frame())
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                section_label(ui, "Slide");
                let mut title = view.info.title.clone();
                ui.horizontal(|ui| {
                    ui.label("Title");
                    if ui.text_edit_singleline(&mut title).changed() {
                        action = Some(UiAction::SetTitle(title.clone()));
                    }
                });
                let mut subtitle = view.info.subtitle.clone();
                ui.horizontal(|ui| {
                    ui.label("Subtitle");
                    if ui.text_edit_singleline(&mut subtitle).changed() {
                        action = Some(UiAction::SetSubtitle(subtitle.clone()));
                    }
                });
                separator(ui);

                match view.selected {
                    Some(object) => {
                        if let Some(edit) = object_properties(ui, object) {
                            action = Some(edit);
                        }
                    }
                    None => {
                        ui.label(
                            RichText::new("Select an object to edit its properties.")
                                .color(theme::TEXT_MUTED),
                        );
                    }
                }

                separator(ui);
                section_label(ui, "Shortcuts");
                for shortcut in SHORTCUTS {
                    ui.label(
                        RichText::new(format!("{}: {}", shortcut.key, shortcut.description))
                            .size(11.0)
                            .color(theme::TEXT_MUTED),
                    );
                }
            });
        });

    action
}

fn geometry_field(ui: &mut egui::Ui, label: &str, value: f64, min: f64) -> Option<f64> {
    let mut edited = value;
    let mut changed = false;
    ui.horizontal(|ui| {
        ui.label(label);
        changed = ui
            .add(
                egui::DragValue::new(&mut edited)
                    .speed(0.01)
                    .range(min..=100.0)
                    .fixed_decimals(3)
                    .suffix(" in"),
            )
            .changed();
    });
    changed.then_some(edited)
}

fn color_field(ui: &mut egui::Ui, label: &str, color: SerializableColor) -> Option<SerializableColor> {
    let mut rgb = [color.r, color.g, color.b];
    let mut changed = false;
    ui.horizontal(|ui| {
        ui.label(label);
        changed = ui.color_edit_button_srgb(&mut rgb).changed();
        ui.label(RichText::new(color.to_hex()).monospace().size(11.0));
    });
    changed.then(|| SerializableColor::rgb(rgb[0], rgb[1], rgb[2]))
}

fn object_properties(ui: &mut egui::Ui, object: &SlideObject) -> Option<UiAction> {
    let mut action = None;
    let kind = object.kind();

    section_label(ui, &format!("Object: {}", kind.name()));
    ui.add_space(4.0);

    if let Some(v) = geometry_field(ui, "Left", object.left, -100.0) {
        action = Some(UiAction::Edit(PropertyEdit::Left(v)));
    }
    if let Some(v) = geometry_field(ui, "Top", object.top, -100.0) {
        action = Some(UiAction::Edit(PropertyEdit::Top(v)));
    }
    if let Some(v) = geometry_field(ui, "Width", object.width, 0.0) {
        action = Some(UiAction::Edit(PropertyEdit::Width(v)));
    }
    if let Some(v) = geometry_field(ui, "Height", object.height, 0.0) {
        action = Some(UiAction::Edit(PropertyEdit::Height(v)));
    }

    if !matches!(kind, ObjectKind::Text(_)) {
        if let Some(color) = color_field(ui, "Fill", object.fill_color) {
            action = Some(UiAction::Edit(PropertyEdit::FillColor(color)));
        }
    }

    if let Some(body) = kind.text_body() {
        separator(ui);
        section_label(ui, "Text");
        let mut text = body.text.clone();
        if ui
            .add(
                egui::TextEdit::multiline(&mut text)
                    .desired_rows(3)
                    .desired_width(f32::INFINITY),
            )
            .changed()
        {
            action = Some(UiAction::Edit(PropertyEdit::Text(text)));
        }

        if let Some(color) = color_field(ui, "Font color", body.font_color) {
            action = Some(UiAction::Edit(PropertyEdit::FontColor(color)));
        }

        let mut size = object.font_size;
        ui.horizontal(|ui| {
            ui.label("Font size");
            if ui
                .add(
                    egui::DragValue::new(&mut size)
                        .speed(1.0)
                        .fixed_decimals(0)
                        .range(1.0..=200.0)
                        .suffix(" pt"),
                )
                .changed()
            {
                action = Some(UiAction::Edit(PropertyEdit::FontSize(size)));
            }
        });
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 4.0;
            for preset in FONT_PRESETS {
                let current = (object.font_size - preset).abs() < f64::EPSILON;
                if FontSizeButton::new(preset, current).show(ui) {
                    action = Some(UiAction::FontPreset(preset));
                }
            }
        });

        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 4.0;
            for align in HAlign::ALL {
                if ToggleButton::new(align.as_str(), body.halign == align).show(ui) {
                    action = Some(UiAction::Edit(PropertyEdit::HAlign(align)));
                }
            }
        });
        // Free text always hangs from its top edge.
        if matches!(kind, ObjectKind::Box(_)) {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 4.0;
                for align in VAlign::ALL {
                    if ToggleButton::new(align.as_str(), object.valign == align).show(ui) {
                        action = Some(UiAction::Edit(PropertyEdit::VAlign(align)));
                    }
                }
            });
        }
    }

    separator(ui);
    section_label(ui, "Palette");
    let current = match kind.text_body() {
        Some(body) => body.font_color,
        None => object.fill_color,
    };
    if let Some(entry) = palette_row(ui, Some(to_color32(current))) {
        let (r, g, b) = entry.rgb;
        action = Some(UiAction::Palette(SerializableColor::rgb(r, g, b)));
    }

    ui.add_space(8.0);
    if ToggleButton::new("Delete object", false).show(ui) {
        action = Some(UiAction::DeleteSelected);
    }

    action
}

/// Bottom panel: JSON export, load, batch add and screenshot.
fn render_json_panel(ctx: &Context, ui_state: &mut UiState) -> Option<UiAction> {
    let mut action = None;
    let busy = ui_state.busy;

    egui::TopBottomPanel::bottom("json")
        .resizable(true)
        .default_height(230.0)
        .frame(panel_frame())
        .show(ctx, |ui| {
            ui.columns(3, |columns| {
                let ui = &mut columns[0];
                section_label(ui, "Export");
                ui.horizontal(|ui| {
                    if ui.add_enabled(!busy, egui::Button::new("Export JSON")).clicked() {
                        action = Some(UiAction::ExportJson);
                    }
                    let has_output = !ui_state.json_output.is_empty();
                    if ui.add_enabled(has_output, egui::Button::new("Copy")).clicked() {
                        action = Some(UiAction::CopyJson);
                    }
                    if ui.add_enabled(has_output, egui::Button::new("Save...")).clicked() {
                        action = Some(UiAction::SaveJson);
                    }
                });
                egui::ScrollArea::vertical()
                    .id_salt("json_output")
                    .show(ui, |ui| {
                        ui.add(
                            egui::TextEdit::multiline(&mut ui_state.json_output.as_str())
                                .code_editor()
                                .desired_width(f32::INFINITY),
                        );
                    });

                let ui = &mut columns[1];
                section_label(ui, "Load JSON");
                if ui.add_enabled(!busy, egui::Button::new("Load")).clicked() {
                    action = Some(UiAction::LoadJson(ui_state.json_input.clone()));
                }
                egui::ScrollArea::vertical()
                    .id_salt("json_input")
                    .show(ui, |ui| {
                        ui.add(
                            egui::TextEdit::multiline(&mut ui_state.json_input)
                                .code_editor()
                                .hint_text("Paste slide JSON here")
                                .desired_width(f32::INFINITY),
                        );
                    });

                let ui = &mut columns[2];
                section_label(ui, "Add objects");
                ui.horizontal(|ui| {
                    if ui.button("Add").clicked() {
                        action = Some(UiAction::AddObjects(ui_state.objects_input.clone()));
                    }
                    if ui.add_enabled(!busy, egui::Button::new("Screenshot")).clicked() {
                        action = Some(UiAction::Screenshot);
                    }
                    if busy {
                        ui.spinner();
                    }
                });
                egui::ScrollArea::vertical()
                    .id_salt("objects_input")
                    .show(ui, |ui| {
                        ui.add(
                            egui::TextEdit::multiline(&mut ui_state.objects_input)
                                .code_editor()
                                .hint_text("[{\"type\": \"box\", \"left\": 1, ...}]")
                                .desired_width(f32::INFINITY),
                        );
                    });
            });
        });

    action
}

fn backdrop(ctx: &Context, id: &str) {
    egui::Area::new(egui::Id::new(id))
        .fixed_pos(Pos2::ZERO)
        .order(egui::Order::Middle)
        .show(ctx, |ui| {
            let screen_rect = ctx.input(|i| i.content_rect());
            ui.allocate_rect(screen_rect, egui::Sense::click());
            ui.painter()
                .rect_filled(screen_rect, 0.0, Color32::from_black_alpha(80));
        });
}

fn render_notification(ctx: &Context, ui_state: &mut UiState) {
    let Some(notification) = ui_state.notification.clone() else {
        return;
    };
    backdrop(ctx, "notification_backdrop");

    egui::Area::new(egui::Id::new("notification"))
        .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            panel_frame().show(ui, |ui| {
                ui.set_max_width(420.0);
                let (heading, color) = match notification.kind {
                    NotificationKind::Info => ("Done", Color32::from_rgb(0x44, 0x72, 0xC4)),
                    NotificationKind::Error => ("Error", Color32::from_rgb(200, 50, 50)),
                };
                ui.label(RichText::new(heading).size(15.0).strong().color(color));
                ui.add_space(6.0);
                ui.label(&notification.message);
                ui.add_space(10.0);
                if ui.button("OK").clicked() {
                    ui_state.notification = None;
                }
            });
        });
}

fn render_confirm_clear(ctx: &Context, ui_state: &mut UiState) -> Option<UiAction> {
    let mut action = None;
    backdrop(ctx, "confirm_clear_backdrop");

    egui::Area::new(egui::Id::new("confirm_clear"))
        .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            panel_frame().show(ui, |ui| {
                ui.label(RichText::new("Delete all objects?").size(15.0).strong());
                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    if ui.button("Delete all").clicked() {
                        ui_state.confirm_clear_open = false;
                        action = Some(UiAction::ClearAll);
                    }
                    if ui.button("Cancel").clicked() {
                        ui_state.confirm_clear_open = false;
                    }
                });
            });
        });

    action
}
