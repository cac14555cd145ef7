#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum KeyboardSkin {
    Piano,
    Harpsichord,
    Wood,
    Synth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MalletType {
    Glockenspiel,
    Vibes,
    Marimba,
    Xylophone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GuitarType {
    Acoustic,
    Electric,
}

/// How an upright bass is played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BassStyle {
    Pizzicato,
    Arco,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TrumpetType {
    Normal,
    Muted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PipeSkin {
    Wood,
    Gold,
}

/// Every instrument the stage can show.
///
/// Closed set: a program either maps to one of these (see
/// [`instrument_for_program`](crate::resolve::table::instrument_for_program))
/// or is not shown at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InstrumentKind {
    Keyboard(KeyboardSkin),
    TubularBells,
    Mallets(MalletType),
    MusicBox,
    Accordion,
    Harmonica,
    Guitar(GuitarType),
    AcousticBass(BassStyle),
    BassGuitar,
    Violin,
    Viola,
    Cello,
    StageStrings,
    PizzicatoStrings,
    Harp,
    Timpani,
    StageChoir,
    Trumpet(TrumpetType),
    Trombone,
    Tuba,
    FrenchHorn,
    StageHorns,
    SopranoSax,
    AltoSax,
    TenorSax,
    BaritoneSax,
    Piccolo,
    Flute,
    Recorder,
    PanFlute(PipeSkin),
    BlownBottle,
    Whistles,
    Ocarina,
    Agogos,
    SteelDrums,
    Woodblocks,
    TaikoDrum,
    MelodicTom,
    SynthDrum,
    TelephoneRing,
    Helicopter,
    Gunshot,
    /// The channel 9 drum kit
    Percussion,
}

/// How a melodic instrument reacts to a note
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Articulation {
    /// Hit with a stick or mallet: swing down, recoil
    Struck,
    /// Hit and left ringing: swing down, wobble
    Rung,
    /// Keys, valves, strings: recoil only
    Pressed,
}

impl InstrumentKind {
    pub fn articulation(&self) -> Articulation {
        use InstrumentKind::*;
        match self {
            Mallets(_) | Timpani | Agogos | SteelDrums | Woodblocks | TaikoDrum | MelodicTom
            | SynthDrum | Percussion => Articulation::Struck,
            TubularBells => Articulation::Rung,
            _ => Articulation::Pressed,
        }
    }

    /// Same instrument regardless of skin or type: a piano and a synth
    /// keyboard are one family, as are muted and open trumpets.
    pub fn same_family(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Short display name
    pub fn name(&self) -> &'static str {
        use InstrumentKind::*;
        match self {
            Keyboard(KeyboardSkin::Piano) => "Piano",
            Keyboard(KeyboardSkin::Harpsichord) => "Harpsichord",
            Keyboard(KeyboardSkin::Wood) => "Wood Keyboard",
            Keyboard(KeyboardSkin::Synth) => "Synth Keyboard",
            TubularBells => "Tubular Bells",
            Mallets(MalletType::Glockenspiel) => "Glockenspiel",
            Mallets(MalletType::Vibes) => "Vibraphone",
            Mallets(MalletType::Marimba) => "Marimba",
            Mallets(MalletType::Xylophone) => "Xylophone",
            MusicBox => "Music Box",
            Accordion => "Accordion",
            Harmonica => "Harmonica",
            Guitar(GuitarType::Acoustic) => "Acoustic Guitar",
            Guitar(GuitarType::Electric) => "Electric Guitar",
            AcousticBass(BassStyle::Pizzicato) => "Upright Bass",
            AcousticBass(BassStyle::Arco) => "Bowed Bass",
            BassGuitar => "Bass Guitar",
            Violin => "Violin",
            Viola => "Viola",
            Cello => "Cello",
            StageStrings => "Strings",
            PizzicatoStrings => "Pizzicato Strings",
            Harp => "Harp",
            Timpani => "Timpani",
            StageChoir => "Choir",
            Trumpet(TrumpetType::Normal) => "Trumpet",
            Trumpet(TrumpetType::Muted) => "Muted Trumpet",
            Trombone => "Trombone",
            Tuba => "Tuba",
            FrenchHorn => "French Horn",
            StageHorns => "Brass Section",
            SopranoSax => "Soprano Sax",
            AltoSax => "Alto Sax",
            TenorSax => "Tenor Sax",
            BaritoneSax => "Baritone Sax",
            Piccolo => "Piccolo",
            Flute => "Flute",
            Recorder => "Recorder",
            PanFlute(PipeSkin::Wood) => "Pan Flute",
            PanFlute(PipeSkin::Gold) => "Gold Pan Flute",
            BlownBottle => "Blown Bottle",
            Whistles => "Whistles",
            Ocarina => "Ocarina",
            Agogos => "Agogos",
            SteelDrums => "Steel Drums",
            Woodblocks => "Woodblocks",
            TaikoDrum => "Taiko Drum",
            MelodicTom => "Melodic Tom",
            SynthDrum => "Synth Drum",
            TelephoneRing => "Telephone",
            Helicopter => "Helicopter",
            Gunshot => "Gunshot",
            Percussion => "Drum Kit",
        }
    }
}
