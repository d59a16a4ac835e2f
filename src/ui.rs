//! Egui UI helpers for L-System editing.
//!
//! Provides a reusable panel for editing an [`LSystem`], allowing any
//! application with `bevy_egui` to embed system controls next to its viewport.

use bevy_egui::egui;

use crate::lsystem::LSystem;

/// What the user did in the editor this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LSystemEditorResponse {
    /// Any parameter was modified.
    pub changed: bool,
    /// The "Rewrite" button was clicked.
    pub rewrite_requested: bool,
    /// The "Reset" button was clicked.
    pub reset_requested: bool,
}

/// Editor widget state that has to outlive a single frame.
#[derive(Debug, Default)]
pub struct LSystemEditor {
    new_rule: String,
    rule_error: Option<String>,
}

impl LSystemEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders name, axiom, turtle parameters and the rule table.
    ///
    /// Edits go through the [`LSystem`] setters, so a modified system drops
    /// its generated string and needs a rewrite before the next draw.
    pub fn show(&mut self, ui: &mut egui::Ui, system: &mut LSystem) -> LSystemEditorResponse {
        let mut response = LSystemEditorResponse::default();

        let mut name = system.name().to_string();
        ui.horizontal(|ui| {
            ui.label("Name:");
            if ui.text_edit_singleline(&mut name).changed() {
                system.set_name(name.clone());
                response.changed = true;
            }
        });

        let mut axiom = system.axiom().to_string();
        ui.horizontal(|ui| {
            ui.label("Axiom:");
            if ui.text_edit_singleline(&mut axiom).changed() {
                system.set_axiom(axiom.clone());
                response.changed = true;
            }
        });

        let mut iterations = system.iterations();
        if ui
            .add(egui::Slider::new(&mut iterations, 0..=12).text("Iterations"))
            .changed()
        {
            system.set_iterations(iterations);
            response.changed = true;
        }

        let mut angle = system.angle();
        if ui
            .add(egui::Slider::new(&mut angle, 0.0..=180.0).text("Angle"))
            .changed()
        {
            system.set_angle(angle);
            response.changed = true;
        }

        let mut distance = system.distance();
        if ui
            .add(egui::Slider::new(&mut distance, 0.01..=5.0).text("Distance"))
            .changed()
        {
            system.set_distance(distance);
            response.changed = true;
        }

        response.changed |= self.rules_section(ui, system);

        ui.separator();
        ui.horizontal(|ui| {
            response.rewrite_requested = ui.button("Rewrite").clicked();
            response.reset_requested = ui.button("Reset").clicked();
        });
        if let Some(generated) = system.generated() {
            ui.label(format!("Generated: {} symbols", generated.chars().count()));
        }

        response
    }

    fn rules_section(&mut self, ui: &mut egui::Ui, system: &mut LSystem) -> bool {
        let mut changed = false;
        let rules: Vec<(char, String)> = system
            .rules()
            .iter()
            .map(|(trigger, successor)| (trigger, successor.to_string()))
            .collect();

        ui.collapsing("Rules", |ui| {
            for (trigger, mut successor) in rules {
                ui.horizontal(|ui| {
                    ui.label(format!("{trigger} →"));
                    if ui.text_edit_singleline(&mut successor).changed()
                        && system.add_rule(trigger, successor.clone()).is_ok()
                    {
                        changed = true;
                    }
                    if ui.small_button("✖").clicked() {
                        system.remove_rule(trigger);
                        changed = true;
                    }
                });
            }

            ui.horizontal(|ui| {
                ui.text_edit_singleline(&mut self.new_rule);
                if ui.button("Add rule").clicked() {
                    match system.add_rule_from_str(&self.new_rule) {
                        Ok(()) => {
                            self.new_rule.clear();
                            self.rule_error = None;
                            changed = true;
                        }
                        Err(err) => self.rule_error = Some(err.to_string()),
                    }
                }
            });
            if let Some(error) = &self.rule_error {
                ui.colored_label(egui::Color32::LIGHT_RED, error);
            }
        });

        changed
    }
}
