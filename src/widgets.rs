// Shared text and button styling for both sections.
use bevy::prelude::*;

pub struct WidgetsPlugin;

impl Plugin for WidgetsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, button_visuals);
    }
}

pub const DUSK: Color = Color::srgb(0.18, 0.09, 0.2);
pub const SUNSET: Color = Color::srgb(0.93, 0.46, 0.32);
pub const CREAM: Color = Color::srgb(1.0, 0.95, 0.86);

const NORMAL_BUTTON: Color = Color::srgb(0.36, 0.16, 0.3);
const HOVERED_BUTTON: Color = Color::srgb(0.5, 0.22, 0.36);
const PRESSED_BUTTON: Color = Color::srgb(0.66, 0.3, 0.4);
const IDLE_BORDER: Color = Color::srgba(1.0, 0.95, 0.86, 0.3);

/// Buttons that take the shared hover/press colours.
#[derive(Component)]
pub struct Pressable;

pub fn label(text: impl Into<String>, font_size: f32, color: Color) -> impl Bundle {
    (
        Text::new(text),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(color),
    )
}

pub fn spawn_button(parent: &mut ChildSpawnerCommands, text: &str, marker: impl Bundle) {
    parent
        .spawn((
            marker,
            Pressable,
            Button,
            Node {
                min_width: Val::Px(160.0),
                height: Val::Px(48.0),
                padding: UiRect::horizontal(Val::Px(16.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BorderColor::all(IDLE_BORDER),
            BackgroundColor(NORMAL_BUTTON),
        ))
        .with_children(|btn| {
            btn.spawn(label(text, 22.0, CREAM));
        });
}

/// Background and border for a button in the given interaction state.
fn palette(interaction: Interaction) -> (Color, Color) {
    match interaction {
        Interaction::Pressed => (PRESSED_BUTTON, CREAM),
        Interaction::Hovered => (HOVERED_BUTTON, CREAM),
        Interaction::None => (NORMAL_BUTTON, IDLE_BORDER),
    }
}

fn button_visuals(
    mut query: Query<
        (&Interaction, &mut BackgroundColor, &mut BorderColor),
        (Changed<Interaction>, With<Pressable>),
    >,
) {
    for (interaction, mut bg, mut border) in &mut query {
        let (fill, edge) = palette(*interaction);
        bg.0 = fill;
        *border = BorderColor::all(edge);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_idle_buttons_use_the_quiet_border() {
        assert_eq!(palette(Interaction::None), (NORMAL_BUTTON, IDLE_BORDER));
        assert_eq!(palette(Interaction::Hovered).1, CREAM);
        assert_eq!(palette(Interaction::Pressed).1, CREAM);
        assert_ne!(palette(Interaction::Hovered).0, palette(Interaction::Pressed).0);
    }
}
