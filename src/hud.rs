//! Text overlays: the score readout and the "GAME OVER" banner.
//!
//! | System                     | Schedule | Purpose                          |
//! |----------------------------|----------|----------------------------------|
//! | `setup_hud`                | Startup  | Spawn score text + hidden banner |
//! | `hud_score_display_system` | Update   | Refresh score text while playing |
//!
//! The banner is revealed by
//! [`crate::collision::player_asteroid_contact_system`] and never hidden again.

use crate::constants::{
    GAME_OVER_FONT_SIZE, GAME_OVER_TEXT, HUD_MARGIN, SCORE_FONT_SIZE, SCORE_LABEL,
};
use crate::state::Score;
use bevy::prelude::*;

/// Marker for the score text node.
#[derive(Component)]
pub struct ScoreText;

/// Marker for the full-screen container holding the centred banner.
#[derive(Component)]
pub struct GameOverText;

/// Text shown for a given score.
pub fn score_label(points: u32) -> String {
    format!("{SCORE_LABEL}{points}")
}

/// Spawn the score readout (top-left) and the hidden "GAME OVER" banner.
pub fn setup_hud(mut commands: Commands) {
    commands.spawn((
        Text::new(score_label(0)),
        TextFont {
            font_size: SCORE_FONT_SIZE,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(HUD_MARGIN),
            top: Val::Px(HUD_MARGIN),
            ..default()
        },
        ScoreText,
    ));

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                ..default()
            },
            Visibility::Hidden,
            GameOverText,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(GAME_OVER_TEXT),
                TextFont {
                    font_size: GAME_OVER_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

/// Rewrite the score text from [`Score`].
pub fn hud_score_display_system(score: Res<Score>, mut q: Query<&mut Text, With<ScoreText>>) {
    for mut text in q.iter_mut() {
        let label = score_label(score.points);
        if text.0 != label {
            text.0 = label;
        }
    }
}
