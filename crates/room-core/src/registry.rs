//! Load-time classification of scene nodes into typed roles.
//!
//! Node names coming out of the modelling tool carry markers such as
//! `Raycaster`, `Hover` or `Pointer`, plus an identifying stem like
//! `About_Button` or `C#1_Key`. The classification pass reads every mesh name
//! exactly once and stores the result as [`NodeTags`] on the node; later code
//! switches on the tags and never looks at names again.
//!
//! Matching is token-bounded: a pattern only matches where it is delimited by
//! the start/end of the name or a non-alphanumeric character, so `Box_1` does
//! not match `Box_10`. When several patterns match, the longest one wins and
//! ties go to table order. When two nodes claim the same singleton role, the
//! first one visited keeps the registry slot; both keep their tags.

use crate::constants::{FISH_OFFSET, GITHUB_URL, TWITTER_URL, YOUTUBE_URL};
use crate::error::RoomError;
use crate::scene::{NodeId, SceneGraph};
use fnv::FnvHashMap;
use glam::Vec3;
use std::collections::hash_map::Entry;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModalKind {
    Work,
    About,
    Contact,
}

impl ModalKind {
    pub const ALL: [ModalKind; 3] = [ModalKind::Work, ModalKind::About, ModalKind::Contact];

    /// DOM-facing id, matches the `.modal.<id>` class.
    pub fn id(self) -> &'static str {
        match self {
            ModalKind::Work => "work",
            ModalKind::About => "about",
            ModalKind::Contact => "contact",
        }
    }

    pub fn from_id(id: &str) -> Result<Self, RoomError> {
        Self::ALL
            .into_iter()
            .find(|m| m.id() == id)
            .ok_or_else(|| RoomError::UnknownModal(id.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SocialLink {
    GitHub,
    YouTube,
    Twitter,
}

impl SocialLink {
    pub fn url(self) -> &'static str {
        match self {
            SocialLink::GitHub => GITHUB_URL,
            SocialLink::YouTube => YOUTUBE_URL,
            SocialLink::Twitter => TWITTER_URL,
        }
    }
}

const PIANO_KEY_NAMES: [&str; 24] = [
    "C1_Key", "C#1_Key", "D1_Key", "D#1_Key", "E1_Key", "F1_Key", "F#1_Key", "G1_Key", "G#1_Key",
    "A1_Key", "A#1_Key", "B1_Key", "C2_Key", "C#2_Key", "D2_Key", "D#2_Key", "E2_Key", "F2_Key",
    "F#2_Key", "G2_Key", "G#2_Key", "A2_Key", "A#2_Key", "B2_Key",
];

/// One of the 24 keys, C1 (index 0) through B2 (index 23).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PianoKey(u8);

impl PianoKey {
    pub const COUNT: usize = PIANO_KEY_NAMES.len();

    pub fn from_index(index: usize) -> Option<Self> {
        (index < Self::COUNT).then_some(PianoKey(index as u8))
    }

    pub fn all() -> impl Iterator<Item = PianoKey> {
        (0..Self::COUNT as u8).map(PianoKey)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Name stem used in the model, e.g. `C#1_Key`.
    pub fn node_name(self) -> &'static str {
        PIANO_KEY_NAMES[self.index()]
    }

    /// Sample name; the recordings are numbered from the top of the keyboard.
    pub fn sample_name(self) -> String {
        format!("Key_{}", Self::COUNT - self.index())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Decoration {
    Plank(u8),
    Frame(u8),
    Flower(u8),
    Box(u8),
    Lamp,
    Slipper(u8),
    Egg(u8),
}

/// Semantic role of a classified node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Button(ModalKind),
    SocialLink(SocialLink),
    PianoKey(PianoKey),
    NameLetter(u8),
    Boba,
    Fish,
    Coffee,
    ChairTop,
    HourHand,
    MinuteHand,
    Decoration(Decoration),
}

impl Role {
    /// Whether the node starts hidden and is revealed by the intro sequence.
    pub fn has_intro(self) -> bool {
        !matches!(
            self,
            Role::Coffee | Role::ChairTop | Role::HourHand | Role::MinuteHand
        )
    }

    /// Scale the node is parked at until the intro reveals it.
    pub fn hidden_scale(self) -> Vec3 {
        match self {
            Role::Decoration(Decoration::Plank(1)) => Vec3::new(0.0, 0.0, 1.0),
            _ => Vec3::ZERO,
        }
    }

    /// Hover tilt direction about X: -1, +1, or 0 for no tilt.
    pub fn hover_tilt_sign(self) -> f32 {
        match self {
            Role::Button(ModalKind::About) => -1.0,
            Role::Button(_) | Role::SocialLink(_) => 1.0,
            _ => 0.0,
        }
    }

    /// Floating props lift on hover.
    pub fn floats(self) -> bool {
        matches!(self, Role::Boba | Role::NameLetter(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FanAxis {
    X,
    Y,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureSet {
    First,
    Second,
    Third,
    Fourth,
}

impl TextureSet {
    pub const ALL: [TextureSet; 4] = [
        TextureSet::First,
        TextureSet::Second,
        TextureSet::Third,
        TextureSet::Fourth,
    ];

    pub fn token(self) -> &'static str {
        match self {
            TextureSet::First => "First",
            TextureSet::Second => "Second",
            TextureSet::Third => "Third",
            TextureSet::Fourth => "Fourth",
        }
    }
}

/// Material the renderer should substitute for a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaterialKind {
    Water,
    Glass,
    Bubble,
    Screen,
    Room(TextureSet),
}

/// Everything the classification pass learned from a node's name.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NodeTags {
    pub role: Option<Role>,
    pub fan: Option<FanAxis>,
    pub material: Option<MaterialKind>,
    /// Produces scale/tilt feedback on pointer-over.
    pub hover: bool,
    /// Shows the pointer cursor while nearest under the pointer.
    pub pointer: bool,
    /// Participates in picking.
    pub raycast: bool,
    /// Picked through its own mesh instead of a synthetic box.
    pub source_proxy: bool,
    /// Proxy box is turned a quarter about Y for better coverage.
    pub quarter_turn: bool,
}

const SOURCE_PROXY_NAMES: [&str; 3] = ["Bulb", "Cactus", "Kirby"];

fn role_rules() -> Vec<(&'static str, Role)> {
    use Decoration::*;
    let mut rules = vec![
        ("Hanging_Plank_1", Role::Decoration(Plank(1))),
        ("Hanging_Plank_2", Role::Decoration(Plank(2))),
        ("My_Work_Button", Role::Button(ModalKind::Work)),
        ("About_Button", Role::Button(ModalKind::About)),
        ("Contact_Button", Role::Button(ModalKind::Contact)),
        ("Boba", Role::Boba),
        ("GitHub", Role::SocialLink(SocialLink::GitHub)),
        ("YouTube", Role::SocialLink(SocialLink::YouTube)),
        ("Twitter", Role::SocialLink(SocialLink::Twitter)),
        ("Name_Letter_1", Role::NameLetter(1)),
        ("Name_Letter_2", Role::NameLetter(2)),
        ("Name_Letter_3", Role::NameLetter(3)),
        ("Name_Letter_4", Role::NameLetter(4)),
        ("Name_Letter_5", Role::NameLetter(5)),
        ("Name_Letter_6", Role::NameLetter(6)),
        ("Name_Letter_7", Role::NameLetter(7)),
        ("Name_Letter_8", Role::NameLetter(8)),
        ("Flower_1", Role::Decoration(Flower(1))),
        ("Flower_2", Role::Decoration(Flower(2))),
        ("Flower_3", Role::Decoration(Flower(3))),
        ("Flower_4", Role::Decoration(Flower(4))),
        ("Flower_5", Role::Decoration(Flower(5))),
        ("Box_1", Role::Decoration(Box(1))),
        ("Box_2", Role::Decoration(Box(2))),
        ("Box_3", Role::Decoration(Box(3))),
        ("Lamp", Role::Decoration(Lamp)),
        ("Slipper_1", Role::Decoration(Slipper(1))),
        ("Slipper_2", Role::Decoration(Slipper(2))),
        ("Fish_Fourth", Role::Fish),
        ("Egg_1", Role::Decoration(Egg(1))),
        ("Egg_2", Role::Decoration(Egg(2))),
        ("Egg_3", Role::Decoration(Egg(3))),
        ("Frame_1", Role::Decoration(Frame(1))),
        ("Frame_2", Role::Decoration(Frame(2))),
        ("Frame_3", Role::Decoration(Frame(3))),
        ("Chair_Top", Role::ChairTop),
        ("Hour_Hand", Role::HourHand),
        ("Minute_Hand", Role::MinuteHand),
        ("Coffee", Role::Coffee),
    ];
    rules.extend(PianoKey::all().map(|k| (k.node_name(), Role::PianoKey(k))));
    rules
}

/// Token-bounded substring test.
pub fn has_token(name: &str, pattern: &str) -> bool {
    if pattern.is_empty() {
        return false;
    }
    let bytes = name.as_bytes();
    let separator = |i: usize| bytes.get(i).map_or(true, |b| !b.is_ascii_alphanumeric());
    name.match_indices(pattern).any(|(start, m)| {
        let before = start.checked_sub(1).map_or(true, separator);
        before && separator(start + m.len())
    })
}

fn classify_role(name: &str, rules: &[(&'static str, Role)]) -> Option<Role> {
    let mut best: Option<(usize, Role)> = None;
    for &(pattern, role) in rules {
        if has_token(name, pattern) && best.map_or(true, |(len, _)| pattern.len() > len) {
            best = Some((pattern.len(), role));
        }
    }
    best.map(|(_, role)| role)
}

fn classify_material(name: &str) -> Option<MaterialKind> {
    if has_token(name, "Water") {
        Some(MaterialKind::Water)
    } else if has_token(name, "Glass") {
        Some(MaterialKind::Glass)
    } else if has_token(name, "Bubble") {
        Some(MaterialKind::Bubble)
    } else if has_token(name, "Screen") {
        Some(MaterialKind::Screen)
    } else {
        TextureSet::ALL
            .into_iter()
            .find(|set| has_token(name, set.token()))
            .map(MaterialKind::Room)
    }
}

/// Reads every marker and stem a node name carries.
pub fn classify_name(name: &str) -> NodeTags {
    tags_with(name, &role_rules())
}

fn tags_with(name: &str, rules: &[(&'static str, Role)]) -> NodeTags {
    let material = classify_material(name);
    // fans only spin when they use one of the baked room texture sets
    let fan = match material {
        Some(MaterialKind::Room(_)) if has_token(name, "Fan") => {
            if has_token(name, "Fan_2") || has_token(name, "Fan_4") {
                Some(FanAxis::X)
            } else {
                Some(FanAxis::Y)
            }
        }
        _ => None,
    };
    NodeTags {
        role: classify_role(name, rules),
        fan,
        material,
        hover: has_token(name, "Hover"),
        pointer: has_token(name, "Pointer"),
        raycast: has_token(name, "Raycaster"),
        source_proxy: SOURCE_PROXY_NAMES.iter().any(|p| has_token(name, p)),
        quarter_turn: has_token(name, "Headphones"),
    }
}

/// Role slots and node groups produced by the classification pass.
#[derive(Debug, Default)]
pub struct Registry {
    slots: FnvHashMap<Role, NodeId>,
    pub x_axis_fans: Vec<NodeId>,
    pub y_axis_fans: Vec<NodeId>,
    /// Pickable nodes visible from the start; hitboxes are built at load.
    pub immediate_pickables: Vec<NodeId>,
    /// Pickable nodes hidden until the intro reveals them.
    pub deferred_pickables: Vec<NodeId>,
}

impl Registry {
    /// Classify every mesh node, capture rest transforms and park intro nodes.
    pub fn classify(scene: &mut SceneGraph) -> Registry {
        let mut reg = Registry::default();
        let mesh_ids: Vec<NodeId> = scene
            .iter()
            .filter(|(_, n)| n.is_mesh())
            .map(|(id, _)| id)
            .collect();
        let rules = role_rules();

        for id in mesh_ids {
            let Some(node) = scene.get_mut(id) else {
                continue;
            };
            let tags = tags_with(&node.name, &rules);

            if tags.role == Some(Role::Fish) {
                node.transform.position += FISH_OFFSET;
            }
            if tags.role.is_some() || tags.hover || tags.raycast {
                node.capture_initial();
            }
            let intro = tags.role.is_some_and(Role::has_intro);
            if let Some(role) = tags.role {
                if intro {
                    node.transform.scale = role.hidden_scale();
                }
                match reg.slots.entry(role) {
                    Entry::Vacant(slot) => {
                        slot.insert(id);
                    }
                    Entry::Occupied(_) => {
                        log::debug!("[registry] {} duplicates role {:?}", node.name, role);
                    }
                }
            }
            match tags.fan {
                Some(FanAxis::X) => reg.x_axis_fans.push(id),
                Some(FanAxis::Y) => reg.y_axis_fans.push(id),
                None => {}
            }
            if tags.raycast {
                if intro {
                    reg.deferred_pickables.push(id);
                } else {
                    reg.immediate_pickables.push(id);
                }
            }
            node.tags = tags;
        }

        log::info!(
            "[registry] roles={} fans={}x/{}y pickables={} now, {} after intro",
            reg.slots.len(),
            reg.x_axis_fans.len(),
            reg.y_axis_fans.len(),
            reg.immediate_pickables.len(),
            reg.deferred_pickables.len()
        );
        reg
    }

    pub fn get(&self, role: Role) -> Option<NodeId> {
        self.slots.get(&role).copied()
    }

    pub fn role_count(&self) -> usize {
        self.slots.len()
    }
}
