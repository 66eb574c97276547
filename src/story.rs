// Story section: the cat, the dialogue box and the envelope, driven by the sequencer.
use std::time::Duration;

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::script::{Choice, Expression, SceneId, Script};
use crate::sections::Sections;
use crate::sequencer::{Sequencer, SequencerConfig, Stage};
use crate::widgets::{CREAM, DUSK, SUNSET, label, spawn_button};

pub struct StoryPlugin;

impl Plugin for StoryPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SequencerConfig>()
            .add_systems(OnEnter(Sections::Story), (spawn_story, start_story).chain())
            .add_systems(OnExit(Sections::Story), exit_story)
            .add_systems(
                Update,
                (
                    choice_actions,
                    envelope_actions,
                    letter_actions,
                    keyboard_shortcuts,
                    advance_story,
                    settle_portrait,
                )
                    .chain()
                    .run_if(in_state(Sections::Story).and(resource_exists::<Sequencer>)),
            );

        #[cfg(debug_assertions)]
        app.add_systems(
            Update,
            log_sequencer_state.run_if(resource_exists::<Sequencer>),
        );
    }
}

const PULSE_SCALE: f32 = 0.95;
const OPENED_SCALE: f32 = 1.15;
const ENVELOPE_CLOSED: Color = Color::srgb(0.98, 0.86, 0.72);
const ENVELOPE_OPENED: Color = Color::srgb(0.98, 0.62, 0.68);

#[derive(Component)]
struct CatPortrait;

#[derive(Component)]
struct SpeakerLabel;

#[derive(Component)]
struct DialogueLine;

#[derive(Component)]
struct ChoiceList;

#[derive(Component)]
struct ChoiceButton(SceneId);

#[derive(Component)]
struct Envelope;

#[derive(Component)]
struct LetterOverlay;

#[derive(Component)]
struct LetterText;

/// Shrinks the portrait briefly after an expression change.
#[derive(Component)]
struct PortraitPulse(Timer);

fn portrait_face(expression: Expression) -> &'static str {
    match expression {
        Expression::Normal => "=^.^=",
        Expression::Excited => "=^o^=",
        Expression::Curious => "=^?^=",
    }
}

fn portrait_tint(expression: Expression) -> Color {
    match expression {
        Expression::Normal => CREAM,
        Expression::Excited => Color::srgb(1.0, 0.8, 0.45),
        Expression::Curious => Color::srgb(0.75, 0.85, 1.0),
    }
}

/// The story UI as seen by the sequencer.
#[derive(SystemParam)]
struct UiStage<'w, 's> {
    commands: Commands<'w, 's>,
    texts: ParamSet<
        'w,
        's,
        (
            Query<'w, 's, &'static mut Text, With<SpeakerLabel>>,
            Query<'w, 's, &'static mut Text, With<DialogueLine>>,
            Query<'w, 's, &'static mut Text, With<LetterText>>,
            Query<
                'w,
                's,
                (
                    Entity,
                    &'static mut Text,
                    &'static mut TextColor,
                    &'static mut UiTransform,
                ),
                With<CatPortrait>,
            >,
        ),
    >,
    choice_lists: Query<'w, 's, Entity, With<ChoiceList>>,
    envelopes: Query<
        'w,
        's,
        (
            &'static mut Visibility,
            &'static mut BackgroundColor,
            &'static mut UiTransform,
        ),
        (With<Envelope>, Without<LetterOverlay>, Without<CatPortrait>),
    >,
    overlays: Query<'w, 's, &'static mut Visibility, (With<LetterOverlay>, Without<Envelope>)>,
}

impl UiStage<'_, '_> {
    fn set_envelope(&mut self, visibility: Visibility, colour: Color, scale: f32) {
        for (mut vis, mut bg, mut transform) in self.envelopes.iter_mut() {
            *vis = visibility;
            bg.0 = colour;
            transform.scale = Vec2::splat(scale);
        }
    }

    fn set_overlay(&mut self, visibility: Visibility) {
        for mut vis in self.overlays.iter_mut() {
            *vis = visibility;
        }
    }
}

impl Stage for UiStage<'_, '_> {
    fn set_speaker(&mut self, speaker: &str) {
        for mut text in self.texts.p0().iter_mut() {
            **text = speaker.to_owned();
        }
    }

    fn set_expression(&mut self, expression: Expression, pulse: Duration) {
        let mut portraits = self.texts.p3();
        let Ok((entity, mut text, mut color, mut transform)) = portraits.single_mut() else {
            return;
        };
        **text = portrait_face(expression).to_owned();
        color.0 = portrait_tint(expression);
        transform.scale = Vec2::splat(PULSE_SCALE);
        self.commands
            .entity(entity)
            .insert(PortraitPulse(Timer::new(pulse, TimerMode::Once)));
    }

    fn clear_dialogue(&mut self) {
        for mut text in self.texts.p1().iter_mut() {
            text.clear();
        }
    }

    fn append_dialogue(&mut self, ch: char) {
        for mut text in self.texts.p1().iter_mut() {
            text.push(ch);
        }
    }

    fn clear_choices(&mut self) {
        for list in &self.choice_lists {
            self.commands.entity(list).despawn_related::<Children>();
        }
    }

    fn show_choices(&mut self, choices: &[Choice]) {
        for list in &self.choice_lists {
            self.commands.entity(list).with_children(|parent| {
                for choice in choices {
                    spawn_button(parent, &choice.label, ChoiceButton(choice.target));
                }
            });
        }
    }

    fn show_envelope(&mut self) {
        self.set_envelope(Visibility::Inherited, ENVELOPE_CLOSED, 1.0);
    }

    fn hide_envelope(&mut self) {
        self.set_envelope(Visibility::Hidden, ENVELOPE_CLOSED, 1.0);
    }

    fn open_envelope(&mut self) {
        self.set_envelope(Visibility::Inherited, ENVELOPE_OPENED, OPENED_SCALE);
    }

    fn show_message(&mut self, message: &str) {
        for mut text in self.texts.p2().iter_mut() {
            **text = message.to_owned();
        }
        self.set_overlay(Visibility::Inherited);
    }

    fn hide_message(&mut self) {
        self.set_overlay(Visibility::Hidden);
    }
}

fn spawn_story(mut commands: Commands, config: Res<SequencerConfig>) -> Result {
    let script = Script::sunset()?;
    info!("story script ready with {} scenes", script.scene_count());
    // The sequencer keeps its own copy; every timing for this visit comes from it.
    commands.insert_resource(Sequencer::new(script, config.clone()));

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::End,
                align_items: AlignItems::Center,
                row_gap: Val::Px(20.0),
                padding: UiRect::all(Val::Px(32.0)),
                ..default()
            },
            BackgroundColor(DUSK),
            DespawnOnExit(Sections::Story),
        ))
        .with_children(|parent| {
            parent.spawn((
                CatPortrait,
                label(portrait_face(Expression::Normal), 72.0, CREAM),
            ));

            parent
                .spawn((
                    Envelope,
                    Button,
                    Node {
                        width: Val::Px(140.0),
                        height: Val::Px(90.0),
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        border: UiRect::all(Val::Px(3.0)),
                        ..default()
                    },
                    BorderColor::all(SUNSET),
                    BackgroundColor(ENVELOPE_CLOSED),
                    Visibility::Hidden,
                ))
                .with_children(|envelope| {
                    envelope.spawn(label("[ letter ]", 20.0, DUSK));
                });

            // Dialogue box.
            parent
                .spawn((
                    Node {
                        width: Val::Px(680.0),
                        min_height: Val::Px(140.0),
                        flex_direction: FlexDirection::Column,
                        row_gap: Val::Px(12.0),
                        padding: UiRect::all(Val::Px(20.0)),
                        border: UiRect::all(Val::Px(3.0)),
                        ..default()
                    },
                    BorderColor::all(SUNSET),
                    BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
                ))
                .with_children(|dialogue| {
                    dialogue.spawn((SpeakerLabel, label("", 20.0, SUNSET)));
                    dialogue.spawn((DialogueLine, label("", 26.0, CREAM)));
                });

            parent.spawn((
                ChoiceList,
                Node {
                    flex_direction: FlexDirection::Row,
                    column_gap: Val::Px(16.0),
                    min_height: Val::Px(48.0),
                    ..default()
                },
            ));
        });

    // Letter overlay, shown once the envelope is opened.
    commands
        .spawn((
            LetterOverlay,
            Button,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.75)),
            GlobalZIndex(200),
            Visibility::Hidden,
            DespawnOnExit(Sections::Story),
        ))
        .with_children(|overlay| {
            overlay.spawn((LetterText, label("", 28.0, CREAM)));
        });

    Ok(())
}

fn start_story(mut sequencer: ResMut<Sequencer>, mut stage: UiStage) -> Result {
    sequencer.start(&mut stage)?;
    Ok(())
}

fn exit_story(mut commands: Commands) {
    commands.remove_resource::<Sequencer>();
}

fn choice_actions(
    query: Query<(&Interaction, &ChoiceButton), Changed<Interaction>>,
    mut sequencer: ResMut<Sequencer>,
    mut stage: UiStage,
) {
    for (interaction, choice) in &query {
        if *interaction != Interaction::Pressed {
            continue;
        }
        if let Err(err) = sequencer.select_choice(choice.0, &mut stage) {
            error!("{err}");
        }
    }
}

fn envelope_actions(
    query: Query<&Interaction, (Changed<Interaction>, With<Envelope>)>,
    mut sequencer: ResMut<Sequencer>,
    mut stage: UiStage,
) {
    if query.iter().any(|i| *i == Interaction::Pressed) {
        sequencer.trigger_affordance(&mut stage);
    }
}

fn letter_actions(
    query: Query<&Interaction, (Changed<Interaction>, With<LetterOverlay>)>,
    mut sequencer: ResMut<Sequencer>,
    mut stage: UiStage,
) {
    if query.iter().any(|i| *i == Interaction::Pressed) {
        sequencer.dismiss_message(&mut stage);
    }
}

fn keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut sequencer: ResMut<Sequencer>,
    mut stage: UiStage,
) {
    let result = if keyboard.just_pressed(KeyCode::Enter) {
        sequencer.confirm(&mut stage)
    } else if keyboard.just_pressed(KeyCode::KeyR) {
        sequencer.reset(&mut stage)
    } else {
        Ok(())
    };
    if let Err(err) = result {
        error!("{err}");
    }
}

fn advance_story(
    time: Res<Time>,
    mut sequencer: ResMut<Sequencer>,
    mut stage: UiStage,
    mut next_section: ResMut<NextState<Sections>>,
) {
    if let Some(finished) = sequencer.advance(time.delta(), &mut stage, &mut *next_section) {
        debug!("finished revealing {}", finished.scene);
    }
}

fn settle_portrait(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut PortraitPulse, &mut UiTransform)>,
) {
    for (entity, mut pulse, mut transform) in &mut query {
        if pulse.0.tick(time.delta()).is_finished() {
            transform.scale = Vec2::ONE;
            commands.entity(entity).remove::<PortraitPulse>();
        }
    }
}

#[cfg(debug_assertions)]
fn log_sequencer_state(keyboard: Res<ButtonInput<KeyCode>>, sequencer: Res<Sequencer>) {
    if keyboard.just_pressed(KeyCode::F3) {
        info!(
            "sequencer: {:?}, choices: {:?}, dialogue: {:?}",
            sequencer.state(),
            sequencer.rendered_choices(),
            sequencer.visible_dialogue()
        );
        info!(
            "envelope shown: {}, letter shown: {}, handing off: {}, departed: {}",
            sequencer.envelope_shown(),
            sequencer.message_shown(),
            sequencer.is_handing_off(),
            sequencer.has_departed()
        );
    }
}
