use bevy::prelude::*;
use bevy::text::TextBounds;

use crate::GameState;
use crate::hud::GameFont;

pub struct DialogueLine {
    pub speaker: &'static str,
    pub text: &'static str,
}

const fn line(speaker: &'static str, text: &'static str) -> DialogueLine {
    DialogueLine { speaker, text }
}

pub static DIALOGUE: [DialogueLine; 10] = [
    line("Bobber", ". . ."),
    line("Bobber", "Whoa... this place is way bigger than I imagined."),
    line(
        "Mr. Sea",
        "Welcome, Bobber. I am Mr. Sea, reigning champion of the Tapioca City Racing League.",
    ),
    line("Bobber", "You're the one I need to beat to become the Racer Legend, right?"),
    line("Mr. Sea", "Exactly. But earning that title won't be easy."),
    line(
        "Mr. Sea",
        "To challenge me, you must reach four checkpoints in order - as fast as possible.",
    ),
    line(
        "Mr. Sea",
        "And you must compete against your fellow citizen. Two players. One keyboard. And one winner.",
    ),
    line("Bobber", "Four checkpoints... speed... Tapioca... got it!"),
    line(
        "Mr. Sea",
        "Do that, and you may just become the greatest racer this city has ever seen.",
    ),
    line("Bobber", "Alright! Let's do this!"),
];

const BOX_SIZE: Vec2 = Vec2::new(1000.0, 200.0);
const BOX_Y: f32 = -220.0;

#[derive(Component)]
pub struct DialogueScreenEntity;

#[derive(Component)]
pub struct SpeakerText;

#[derive(Component)]
pub struct LineText;

#[derive(Resource, Default)]
pub struct DialogueProgress {
    pub index: usize,
}

impl DialogueProgress {
    pub fn current(&self) -> Option<&'static DialogueLine> {
        DIALOGUE.get(self.index)
    }

    /// Move to the next line. Returns false once the dialogue has run out.
    pub fn advance(&mut self) -> bool {
        self.index += 1;
        self.index < DIALOGUE.len()
    }
}

fn speaker_label(line: &DialogueLine) -> String {
    format!("{}:", line.speaker)
}

pub fn setup_dialogue(mut commands: Commands, game_font: Res<GameFont>) {
    let progress = DialogueProgress::default();
    let first = &DIALOGUE[0];

    commands.spawn((
        Sprite::from_color(Color::srgba(0.0, 0.0, 0.0, 0.8), BOX_SIZE),
        Transform::from_xyz(0., BOX_Y, 1.),
        DialogueScreenEntity,
    ));

    commands.spawn((
        Text2d::new(speaker_label(first)),
        game_font.text_font(28.0),
        TextColor(Color::srgb(1.0, 0.84, 0.0)),
        bevy::sprite::Anchor::TopLeft,
        Transform::from_xyz(-BOX_SIZE.x / 2.0 + 30.0, BOX_Y + BOX_SIZE.y / 2.0 - 20.0, 2.),
        SpeakerText,
        DialogueScreenEntity,
    ));

    commands.spawn((
        Text2d::new(first.text),
        game_font.text_font(22.0),
        TextColor(Color::WHITE),
        TextBounds::new_horizontal(BOX_SIZE.x - 60.0),
        bevy::sprite::Anchor::TopLeft,
        Transform::from_xyz(-BOX_SIZE.x / 2.0 + 30.0, BOX_Y + BOX_SIZE.y / 2.0 - 70.0, 2.),
        LineText,
        DialogueScreenEntity,
    ));

    commands.spawn((
        Text2d::new("ENTER >"),
        game_font.text_font(18.0),
        TextColor(Color::srgb(0.7, 0.7, 0.7)),
        Transform::from_xyz(BOX_SIZE.x / 2.0 - 70.0, BOX_Y - BOX_SIZE.y / 2.0 + 25.0, 2.),
        DialogueScreenEntity,
    ));

    commands.insert_resource(progress);
}

pub fn advance_dialogue(
    input: Res<ButtonInput<KeyCode>>,
    mut progress: ResMut<DialogueProgress>,
    mut next_state: ResMut<NextState<GameState>>,
    mut speaker: Query<&mut Text2d, (With<SpeakerText>, Without<LineText>)>,
    mut text: Query<&mut Text2d, (With<LineText>, Without<SpeakerText>)>,
) {
    if !input.just_pressed(KeyCode::Enter) && !input.just_pressed(KeyCode::NumpadEnter) {
        return;
    }

    if !progress.advance() {
        info!("Dialogue finished, starting the race");
        next_state.set(GameState::Playing);
        return;
    }

    let Some(line) = progress.current() else {
        return;
    };
    if let Ok(mut speaker) = speaker.single_mut() {
        speaker.0 = speaker_label(line);
    }
    if let Ok(mut text) = text.single_mut() {
        text.0 = line.text.to_string();
    }
}

pub fn destroy_dialogue(mut commands: Commands, entities: Query<Entity, With<DialogueScreenEntity>>) {
    for entity in &entities {
        commands.entity(entity).despawn();
    }
    commands.remove_resource::<DialogueProgress>();
}
