use std::sync::Arc;

use egui::{Align2, Color32, Context, RichText, TextureHandle, Ui};
use tracing::warn;

use super::state::{Action, AppState, NotificationKind, REPO_PAGE_SIZE};
use crate::analysis::{needs_detail_view, rank_week, WEEK_PREVIEW_LIMIT};
use crate::plotting::{render_weekly_chart, ChartImage};
use crate::types::{UnifiedWeeklyRow, UserProfile, MAX_REPOSITORIES};
use crate::utils::WeekLabel;

const CARD_COLUMNS: usize = 3;
const CARD_WIDTH: f32 = 220.0;
const AVATAR_SIZE: f32 = 28.0;
const SUCCESS_FILL: Color32 = Color32::from_rgb(34, 197, 94);
const ERROR_FILL: Color32 = Color32::from_rgb(239, 68, 68);

/// The uploaded chart texture and the raster it was made from.
#[derive(Default)]
pub struct ChartTexture {
    source: Option<Arc<ChartImage>>,
    texture: Option<TextureHandle>,
    last_error: Option<String>,
}

/// Draw the main application UI and collect what the user did.
pub fn draw_ui(state: &mut AppState, ctx: &Context, chart: &mut ChartTexture) -> Vec<Action> {
    let mut actions = Vec::new();

    egui::SidePanel::left("side_panel")
        .resizable(true)
        .default_width(320.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| side_panel(ui, state, &mut actions));
        });

    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical().show(ui, |ui| central_panel(ui, state, chart, &mut actions));
    });

    week_detail(ctx, state, &mut actions);
    notification(ctx, state, &mut actions);

    actions
}

fn side_panel(ui: &mut Ui, state: &mut AppState, actions: &mut Vec<Action>) {
    ui.heading("Add GitHub Repositories");
    ui.separator();

    ui.add(
        egui::TextEdit::multiline(&mut state.input_urls)
            .hint_text("Enter GitHub URLs, each on a new line (e.g., https://github.com/owner/repo)")
            .desired_rows(6)
            .desired_width(f32::INFINITY),
    );
    ui.label(format!("{}/{} repositories", state.repos.len(), MAX_REPOSITORIES));

    if ui.button("Add Repositories").clicked() {
        actions.push(Action::AddRepositories);
    }
    if let Some(error) = &state.error_message {
        ui.colored_label(ERROR_FILL, error);
    }

    if !state.repos.is_empty() {
        ui.separator();
        ui.heading("Save Data Collection");
        ui.add(
            egui::TextEdit::singleline(&mut state.save_name)
                .hint_text("Collection name (e.g., Project Alpha)"),
        );
        if ui.button("Save Collection").clicked() {
            actions.push(Action::SaveCollection);
        }
    }

    if !state.collections.records().is_empty() {
        ui.separator();
        ui.heading("Your Collections");
        for (index, record) in state.collections.records().iter().enumerate() {
            ui.push_id(index, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&record.name).strong());
                    ui.label(format!("({} repos)", record.repos.len()));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Delete").clicked() {
                            actions.push(Action::DeleteCollection(record.name.clone()));
                        }
                        if ui.button("Load Data").clicked() {
                            actions.push(Action::LoadCollection(record.name.clone()));
                        }
                    });
                });
            });
        }
    }

    ui.separator();
    ui.checkbox(&mut state.use_log_scale, "Log Scale");
}

fn central_panel(
    ui: &mut Ui,
    state: &AppState,
    chart: &mut ChartTexture,
    actions: &mut Vec<Action>,
) {
    ui.heading("Weekly Commit Comparison");
    ui.separator();

    if state.is_loading {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Fetching data from GitHub...");
        });
        return;
    }
    if state.repos.is_empty() {
        ui.label("Add repositories to compare their weekly commit activity.");
        return;
    }

    ui.label(RichText::new(format!("Total commits: {}", state.overall_total())).strong());
    ui.add_space(8.0);
    repository_cards(ui, state, actions);

    let rows = state.rows();
    ui.separator();
    weekly_chart(ui, state, &rows, chart);
    ui.separator();
    weekly_cards(ui, state, &rows, actions);
}

fn owner_line(ui: &mut Ui, profile: &UserProfile) {
    ui.horizontal(|ui| {
        if let Some(url) = &profile.avatar_url {
            ui.add(
                egui::Image::new(url.as_str())
                    .fit_to_exact_size(egui::vec2(AVATAR_SIZE, AVATAR_SIZE))
                    .rounding(AVATAR_SIZE / 2.0),
            );
        }
        match &profile.profile_url {
            Some(url) => {
                ui.hyperlink_to(profile.label(), url);
            }
            None => {
                ui.label(profile.label());
            }
        }
    });
}

fn repository_cards(ui: &mut Ui, state: &AppState, actions: &mut Vec<Action>) {
    let ranked = state.visible_repositories();

    egui::Grid::new("repo_cards")
        .num_columns(CARD_COLUMNS)
        .spacing([12.0, 12.0])
        .show(ui, |ui| {
            for (index, entry) in ranked.iter().enumerate() {
                ui.group(|ui| {
                    ui.set_min_width(CARD_WIDTH);
                    ui.vertical(|ui| {
                        owner_line(ui, &state.profiles.lookup(&entry.repo.owner));
                        ui.hyperlink_to(entry.repo.key(), entry.repo.html_url());
                        ui.horizontal(|ui| {
                            ui.label(format!("Total Commits: {}", entry.total));
                            if ui.small_button("Remove").clicked() {
                                actions.push(Action::RemoveRepository(entry.repo.key()));
                            }
                        });
                    });
                });
                if (index + 1) % CARD_COLUMNS == 0 {
                    ui.end_row();
                }
            }
        });

    if state.repos.len() > REPO_PAGE_SIZE {
        let label = if state.show_all_repos { "Show Less" } else { "Show More" };
        if ui.button(label).clicked() {
            actions.push(Action::ToggleShowAllRepos);
        }
    }
}

fn weekly_chart(ui: &mut Ui, state: &AppState, rows: &[UnifiedWeeklyRow], chart: &mut ChartTexture) {
    match render_weekly_chart(rows, &state.repos, state.use_log_scale) {
        Ok(image) => {
            chart.last_error = None;
            let stale = chart
                .source
                .as_ref()
                .map_or(true, |source| !Arc::ptr_eq(source, &image));
            if stale {
                let pixels = egui::ColorImage::from_rgb(
                    [image.width as usize, image.height as usize],
                    &image.rgb,
                );
                chart.texture = Some(ui.ctx().load_texture(
                    "weekly_chart",
                    pixels,
                    egui::TextureOptions::LINEAR,
                ));
                chart.source = Some(image);
            }
            if let Some(texture) = &chart.texture {
                ui.add(egui::Image::new(texture).max_width(ui.available_width()));
            }
        }
        Err(e) => {
            let message = e.to_string();
            if chart.last_error.as_deref() != Some(message.as_str()) {
                warn!("failed to render weekly chart: {}", message);
                chart.last_error = Some(message);
            }
        }
    }
}

fn week_heading(ui: &mut Ui, week_start: i64) {
    match WeekLabel::from_epoch(week_start) {
        Some(label) => {
            ui.label(RichText::new(label.title()).strong());
            ui.label(RichText::new(label.range()).small());
        }
        None => {
            ui.label(week_start.to_string());
        }
    }
}

fn weekly_cards(
    ui: &mut Ui,
    state: &AppState,
    rows: &[UnifiedWeeklyRow],
    actions: &mut Vec<Action>,
) {
    ui.heading("Weekly Comparison");
    if rows.is_empty() {
        ui.label("No weekly commit data yet.");
        return;
    }

    egui::Grid::new("week_cards")
        .num_columns(CARD_COLUMNS)
        .spacing([12.0, 12.0])
        .show(ui, |ui| {
            for (index, row) in rows.iter().take(state.displayed_weeks).enumerate() {
                ui.group(|ui| {
                    ui.set_min_width(CARD_WIDTH);
                    ui.vertical(|ui| {
                        week_heading(ui, row.week_start);
                        for (repo, commits) in rank_week(row, &state.repos)
                            .into_iter()
                            .take(WEEK_PREVIEW_LIMIT)
                        {
                            owner_line(ui, &state.profiles.lookup(&repo.owner));
                            ui.label(format!("{repo}  Commits: {commits}"));
                        }
                        if needs_detail_view(&state.repos) && ui.button("View More").clicked() {
                            actions.push(Action::OpenWeek(row.week_start));
                        }
                    });
                });
                if (index + 1) % CARD_COLUMNS == 0 {
                    ui.end_row();
                }
            }
        });

    if state.displayed_weeks < rows.len() && ui.button("Show More Weeks").clicked() {
        actions.push(Action::ShowMoreWeeks);
    }
}

fn week_detail(ctx: &Context, state: &AppState, actions: &mut Vec<Action>) {
    let Some(row) = state.selected_row() else {
        return;
    };
    let label = WeekLabel::from_epoch(row.week_start);
    let title = label.map_or_else(|| "Week".to_string(), |l| l.title());

    let mut open = true;
    egui::Window::new(title)
        .id(egui::Id::new("week_detail"))
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            if let Some(label) = label {
                ui.label(label.range());
            }
            ui.separator();
            egui::ScrollArea::vertical().max_height(400.0).show(ui, |ui| {
                for (repo, commits) in rank_week(&row, &state.repos) {
                    ui.horizontal(|ui| {
                        owner_line(ui, &state.profiles.lookup(&repo.owner));
                        ui.label(repo.to_string());
                        ui.label(format!("Commits: {commits}"));
                    });
                }
            });
        });

    if !open {
        actions.push(Action::CloseWeek);
    }
}

fn notification(ctx: &Context, state: &AppState, actions: &mut Vec<Action>) {
    let Some(notification) = &state.notification else {
        return;
    };
    let fill = match notification.kind {
        NotificationKind::Success => SUCCESS_FILL,
        NotificationKind::Error => ERROR_FILL,
    };

    egui::Area::new(egui::Id::new("notification"))
        .anchor(Align2::RIGHT_TOP, [-16.0, 16.0])
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            egui::Frame::none()
                .fill(fill)
                .rounding(6.0)
                .inner_margin(10.0)
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(&notification.message).color(Color32::WHITE));
                        if ui.small_button("x").clicked() {
                            actions.push(Action::DismissNotification);
                        }
                    });
                });
        });
}
