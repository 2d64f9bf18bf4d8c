//! Filter, notification, and detail panels

use egui::{Color32, RichText, Ui};

use crate::data::{RiskLevel, SpaceWeatherNotification};
use crate::engine::{CategoryFilter, FilterState, OrbitFilter, SatelliteSnapshot};

/// Left-hand panel: orbit/category filters and the notification feed.
#[derive(Default)]
pub struct FilterPanel {
    pub filter: FilterState,
    pub risk: RiskLevel,
}

impl FilterPanel {
    /// Returns true when any filter or the risk level changed.
    pub fn show(&mut self, ui: &mut Ui, notifications: &[SpaceWeatherNotification]) -> bool {
        let mut changed = false;

        ui.heading("Filters");

        egui::ComboBox::from_label("Orbit")
            .selected_text(self.filter.orbit.label())
            .show_ui(ui, |ui| {
                for option in OrbitFilter::ALL {
                    if ui
                        .selectable_value(&mut self.filter.orbit, option, option.label())
                        .changed()
                    {
                        changed = true;
                    }
                }
            });

        egui::ComboBox::from_label("Category")
            .selected_text(self.filter.category.label())
            .show_ui(ui, |ui| {
                for option in CategoryFilter::ALL {
                    if ui
                        .selectable_value(&mut self.filter.category, option, option.label())
                        .changed()
                    {
                        changed = true;
                    }
                }
            });

        ui.separator();
        ui.heading("Radiation risk");
        egui::ComboBox::from_label("Level")
            .selected_text(self.risk.label())
            .show_ui(ui, |ui| {
                for option in RiskLevel::ALL {
                    if ui
                        .selectable_value(&mut self.risk, option, option.label())
                        .changed()
                    {
                        changed = true;
                    }
                }
            });
        if self.risk.is_elevated() {
            ui.colored_label(
                Color32::from_rgb(255, 90, 70),
                "High-latitude satellites are flagged",
            );
        }

        ui.separator();
        ui.heading("Notifications");
        if notifications.is_empty() {
            ui.weak("No space weather notifications");
        } else {
            egui::ScrollArea::vertical()
                .max_height(260.0)
                .show(ui, |ui| {
                    for notification in notifications {
                        ui.collapsing(
                            format!(
                                "{} — {}",
                                notification.message_type, notification.message_issue_time
                            ),
                            |ui| {
                                if let Some(body) = &notification.message_body {
                                    ui.label(body);
                                }
                                if let Some(url) = &notification.message_url {
                                    ui.hyperlink(url);
                                }
                            },
                        );
                    }
                });
        }

        changed
    }
}

/// Right-hand detail panel for the selected satellite.
pub struct DetailPanel;

impl DetailPanel {
    /// Returns true when the user deselects.
    pub fn show(ui: &mut Ui, snapshot: &SatelliteSnapshot) -> bool {
        ui.heading(&snapshot.name);
        ui.label(
            RichText::new(format!("Catalog #{}", snapshot.catalog_id))
                .color(Color32::GRAY),
        );

        ui.separator();
        egui::Grid::new("detail_grid")
            .num_columns(2)
            .spacing([10.0, 4.0])
            .show(ui, |ui| {
                ui.label("Orbit:");
                ui.label(snapshot.orbit_class.label());
                ui.end_row();

                ui.label("Category:");
                ui.label(snapshot.category.label());
                ui.end_row();

                ui.label("Camera:");
                ui.label(if snapshot.has_camera { "Yes" } else { "No" });
                ui.end_row();

                ui.label("Latitude:");
                ui.label(format!("{:.2}°", snapshot.lat_deg));
                ui.end_row();

                ui.label("Longitude:");
                ui.label(format!("{:.2}°", snapshot.lon_deg));
                ui.end_row();

                ui.label("Altitude:");
                ui.label(format!("{:.0} km", snapshot.altitude_km));
                ui.end_row();
            });

        if snapshot.decayed {
            ui.colored_label(Color32::from_rgb(200, 120, 120), "Orbit has decayed");
        }

        if let Some(description) = snapshot.description {
            ui.separator();
            ui.label(description);
        }
        if let Some(url) = snapshot.live_feed_url {
            ui.hyperlink_to("Live feed", url);
        }

        ui.separator();
        ui.button("Deselect").clicked()
    }
}
