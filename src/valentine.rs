// Valentine section: the proposal card, the love letter and the memories card.
use bevy::prelude::*;

use crate::sections::Sections;
use crate::widgets::{CREAM, DUSK, SUNSET, label, spawn_button};

pub struct ValentinePlugin;

impl Plugin for ValentinePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Sections::Valentine), setup_valentine)
            .add_systems(OnExit(Sections::Valentine), exit_valentine)
            .add_systems(
                Update,
                (
                    proposal_actions,
                    render_proposal.run_if(resource_exists_and_changed::<Proposal>),
                )
                    .chain()
                    .run_if(in_state(Sections::Valentine)),
            );
    }
}

/// Growth of the Yes button per refusal, and its ceiling.
const YES_GROWTH: f32 = 0.45;
const YES_MAX_SCALE: f32 = 18.0;
/// How far the No button drifts per refusal, and where it stops.
const NO_DRIFT: Vec2 = Vec2::new(18.0, 8.0);
const NO_MAX_DRIFT: Vec2 = Vec2::new(260.0, 120.0);

/// Past the last phrase, the No button keeps saying it forever.
const NO_PHRASES: [&str; 16] = [
    "No",
    "Wait...",
    "Are you sure?",
    "Think again...",
    "The sunset fades...",
    "Please reconsider",
    "Don't break my heart",
    "One more chance?",
    "The stars are waiting",
    "But... but...",
    "My heart...",
    "Please say yes",
    "I'm counting on you",
    "Don't leave me",
    "The moon is sad now",
    "Forever waiting...",
];

const LETTER_DATE: &str = "Feb 14, 2026";
const LETTER_BODY: &str = "Happy valentine's day my baby!! i made this little website just for u \
    and i really hope you like it. i'm not the best at stuff like this but I wanted to do \
    something special that shows how much you mean to me. just know that i love you so much, \
    and every single day i find more reasons to love you even more. you make me so happy and \
    i'm so grateful for you, always and forever";
const LETTER_SIGN: &str = "yours truly,";
const LETTER_NAME: &str = "eldrin";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProposalView {
    #[default]
    Asking,
    Accepted {
        letter_open: bool,
    },
    Memories,
}

/// Everything the proposal card shows is derived from this.
#[derive(Resource, Debug, Default)]
pub struct Proposal {
    refusals: u32,
    view: ProposalView,
}

impl Proposal {
    pub fn view(&self) -> ProposalView {
        self.view
    }

    pub fn refusals(&self) -> u32 {
        self.refusals
    }

    pub fn refuse(&mut self) -> bool {
        if self.view != ProposalView::Asking {
            return false;
        }
        self.refusals = self.refusals.saturating_add(1);
        true
    }

    pub fn accept(&mut self) -> bool {
        if self.view != ProposalView::Asking {
            return false;
        }
        self.view = ProposalView::Accepted { letter_open: false };
        true
    }

    pub fn open_letter(&mut self) -> bool {
        match self.view {
            ProposalView::Accepted { letter_open: false } => {
                self.view = ProposalView::Accepted { letter_open: true };
                true
            }
            _ => false,
        }
    }

    pub fn view_memories(&mut self) -> bool {
        if self.view != (ProposalView::Accepted { letter_open: true }) {
            return false;
        }
        self.view = ProposalView::Memories;
        true
    }

    pub fn yes_scale(&self) -> f32 {
        (1.0 + self.refusals as f32 * YES_GROWTH).min(YES_MAX_SCALE)
    }

    /// Offset of the No button from its resting place, in logical pixels.
    pub fn no_offset(&self) -> Vec2 {
        (NO_DRIFT * self.refusals as f32).min(NO_MAX_DRIFT)
    }

    pub fn no_label(&self) -> &'static str {
        let index = (self.refusals as usize).min(NO_PHRASES.len() - 1);
        NO_PHRASES[index]
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
enum ProposalButton {
    Yes,
    No,
    OpenLetter,
    ViewMemories,
    BackToSunset,
}

#[derive(Component)]
struct ProposalCard;

fn setup_valentine(mut commands: Commands) {
    commands.insert_resource(Proposal::default());

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(DUSK),
            DespawnOnExit(Sections::Valentine),
        ))
        .with_children(|parent| {
            parent.spawn((
                ProposalCard,
                Node {
                    width: Val::Px(720.0),
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    row_gap: Val::Px(18.0),
                    padding: UiRect::all(Val::Px(32.0)),
                    border: UiRect::all(Val::Px(3.0)),
                    ..default()
                },
                BorderColor::all(SUNSET),
                BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.55)),
            ));
        });
}

fn exit_valentine(mut commands: Commands) {
    commands.remove_resource::<Proposal>();
}

fn proposal_actions(
    query: Query<(&Interaction, &ProposalButton), Changed<Interaction>>,
    mut proposal: ResMut<Proposal>,
    mut next_section: ResMut<NextState<Sections>>,
) {
    for (interaction, button) in &query {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match button {
            ProposalButton::Yes => {
                if proposal.accept() {
                    info!("yes, after {} refusals", proposal.refusals());
                }
            }
            ProposalButton::No => {
                if proposal.refuse() {
                    debug!("refused {} times", proposal.refusals());
                }
            }
            ProposalButton::OpenLetter => {
                proposal.open_letter();
            }
            ProposalButton::ViewMemories => {
                proposal.view_memories();
            }
            ProposalButton::BackToSunset => {
                info!("back to the sunset");
                next_section.set(Sections::Story);
            }
        }
    }
}

/// Rebuilds the card contents whenever the proposal changes.
fn render_proposal(
    mut commands: Commands,
    proposal: Res<Proposal>,
    cards: Query<Entity, With<ProposalCard>>,
) {
    let Ok(card) = cards.single() else {
        return;
    };

    commands
        .entity(card)
        .despawn_related::<Children>()
        .with_children(|parent| match proposal.view() {
            ProposalView::Asking => spawn_asking(parent, &proposal),
            ProposalView::Accepted { letter_open } => spawn_accepted(parent, letter_open),
            ProposalView::Memories => spawn_memories(parent),
        });
}

fn spawn_heading(parent: &mut ChildSpawnerCommands, badge: &str, title: &str, subtitle: &str) {
    parent.spawn(label(badge, 18.0, SUNSET));
    parent.spawn(label(title, 44.0, CREAM));
    parent.spawn(label(subtitle, 20.0, Color::srgba(1.0, 0.95, 0.86, 0.8)));
}

fn spawn_asking(parent: &mut ChildSpawnerCommands, proposal: &Proposal) {
    spawn_heading(
        parent,
        "From Eldrin the cat",
        "Be My Valentine?",
        "The sunset awaits your answer...",
    );

    let offset = proposal.no_offset();
    parent
        .spawn(Node {
            flex_direction: FlexDirection::Row,
            column_gap: Val::Px(24.0),
            margin: UiRect::top(Val::Px(24.0)),
            ..default()
        })
        .with_children(|row| {
            spawn_button(
                row,
                "Yes",
                (
                    ProposalButton::Yes,
                    UiTransform {
                        scale: Vec2::splat(proposal.yes_scale()),
                        ..default()
                    },
                    GlobalZIndex(10),
                ),
            );
            spawn_button(
                row,
                proposal.no_label(),
                (
                    ProposalButton::No,
                    UiTransform {
                        translation: Val2::px(offset.x, offset.y),
                        ..default()
                    },
                ),
            );
        });
}

fn spawn_accepted(parent: &mut ChildSpawnerCommands, letter_open: bool) {
    parent.spawn(label("You said yes!", 18.0, SUNSET));
    if !letter_open {
        parent.spawn(label("YESSSS!!!", 44.0, CREAM));
        parent.spawn(label(
            "The sunset is even more beautiful now",
            20.0,
            Color::srgba(1.0, 0.95, 0.86, 0.8),
        ));
        spawn_button(parent, "Open the love letter", ProposalButton::OpenLetter);
        parent.spawn(label("Click to open the letter", 16.0, SUNSET));
        return;
    }

    parent
        .spawn((
            Node {
                width: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(10.0),
                padding: UiRect::all(Val::Px(20.0)),
                ..default()
            },
            BackgroundColor(Color::srgb(1.0, 0.95, 0.9)),
        ))
        .with_children(|letter| {
            letter.spawn(label(LETTER_DATE, 16.0, SUNSET));
            letter.spawn(label(LETTER_BODY, 18.0, DUSK));
            letter.spawn(label(LETTER_SIGN, 18.0, DUSK));
            letter.spawn(label(LETTER_NAME, 22.0, SUNSET));
        });
    parent.spawn(label("Letter opened 💌", 16.0, SUNSET));
    spawn_button(parent, "View our memories", ProposalButton::ViewMemories);
}

fn spawn_memories(parent: &mut ChildSpawnerCommands) {
    spawn_heading(
        parent,
        "Our Journey",
        "Moments with you",
        "Every sunset is better with you",
    );
    spawn_button(parent, "← Back to the sunset", ProposalButton::BackToSunset);
}
