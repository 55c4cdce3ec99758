//! greeting line & the inventory screen
//!
//! `P` opens the inventory and pauses the fixed tick until it closes.

use bevy::prelude::*;

use super::components::{InventoryOverlay, InventorySlots};
use super::terrain::{rgb_color, Actor, Terrain};

const HUD_TEXT: Color = Color::srgb(230.0 / 255.0, 230.0 / 255.0, 230.0 / 255.0);
const SWATCH: f32 = 40.0;

#[derive(Resource, Default)]
pub struct InventoryOpen(pub bool);

/// run condition: the world only advances while the inventory is closed
pub fn playing(open: Res<InventoryOpen>) -> bool {
    !open.0
}

/* ---------- startup ---------- */

pub fn setup_hud(mut commands: Commands) {
    commands.spawn((
        Text::new("Press 'Q' to exit the game"),
        TextFont {
            font_size: 25.0,
            ..default()
        },
        TextColor(HUD_TEXT),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(0.0),
            top: Val::Px(0.0),
            ..default()
        },
    ));

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            Visibility::Hidden,
            InventoryOverlay,
        ))
        .with_children(|overlay| {
            overlay.spawn((
                Text::new("INVENTORY"),
                TextFont {
                    font_size: 40.0,
                    ..default()
                },
                TextColor(HUD_TEXT),
            ));
            overlay.spawn((
                Node {
                    width: Val::Px(400.0),
                    min_height: Val::Px(100.0),
                    padding: UiRect::all(Val::Px(10.0)),
                    column_gap: Val::Px(10.0),
                    row_gap: Val::Px(10.0),
                    flex_wrap: FlexWrap::Wrap,
                    ..default()
                },
                BackgroundColor(Color::WHITE),
                InventorySlots,
            ));
        });
}

/* ---------- frame systems ---------- */

pub fn toggle_inventory_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut open: ResMut<InventoryOpen>,
    mut overlay: Query<&mut Visibility, With<InventoryOverlay>>,
) {
    if !keys.just_pressed(KeyCode::KeyP) {
        return;
    }
    open.0 = !open.0;
    for mut vis in &mut overlay {
        *vis = if open.0 {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}

/// one swatch + count per block kind held, refreshed as the screen opens
pub fn inventory_slots_system(
    mut commands: Commands,
    open: Res<InventoryOpen>,
    actor: Res<Actor>,
    terrain: Res<Terrain>,
    slots: Query<Entity, With<InventorySlots>>,
) {
    if !open.is_changed() || !open.0 {
        return;
    }
    let Ok(slots) = slots.get_single() else { return };

    let mut items: Vec<(&str, u32)> = actor.inventory.iter().collect();
    items.sort_unstable();

    commands
        .entity(slots)
        .despawn_descendants()
        .with_children(|row| {
            for (name, count) in items {
                let color = terrain
                    .palette
                    .by_name(name)
                    .map_or(Color::WHITE, rgb_color);
                row.spawn(Node {
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    ..default()
                })
                .with_children(|slot| {
                    slot.spawn((
                        Node {
                            width: Val::Px(SWATCH),
                            height: Val::Px(SWATCH),
                            ..default()
                        },
                        BackgroundColor(color),
                    ));
                    slot.spawn((
                        Text::new(count.to_string()),
                        TextFont {
                            font_size: 20.0,
                            ..default()
                        },
                        TextColor(Color::BLACK),
                    ));
                });
            }
        });
}
