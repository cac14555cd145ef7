//! Static lookup tables: General MIDI programs and percussion notes

use crate::instrument::{
    kind::{BassStyle, GuitarType, KeyboardSkin, MalletType, PipeSkin, TrumpetType},
    percussion::{DrumVoice, TomPitch},
    InstrumentKind,
};

/// Instrument shown for a General MIDI program (0-127).
///
/// Programs without a stage instrument return `None`; the assignment is then
/// simply not shown.
pub fn instrument_for_program(program: u8) -> Option<InstrumentKind> {
    use InstrumentKind::*;
    let kind = match program {
        0..=5 | 7 => Keyboard(KeyboardSkin::Piano),
        6 => Keyboard(KeyboardSkin::Harpsichord),
        8 | 14 | 98 | 112 => TubularBells,
        9 => Mallets(MalletType::Glockenspiel),
        10 => MusicBox,
        11 => Mallets(MalletType::Vibes),
        12 => Mallets(MalletType::Marimba),
        13 => Mallets(MalletType::Xylophone),
        15..=20 | 55 => Keyboard(KeyboardSkin::Wood),
        21 | 23 => Accordion,
        22 => Harmonica,
        24 | 25 => Guitar(GuitarType::Acoustic),
        26..=31 | 120 => Guitar(GuitarType::Electric),
        32 => AcousticBass(BassStyle::Pizzicato),
        33..=39 => BassGuitar,
        40 | 110 => Violin,
        41 => Viola,
        42 => Cello,
        43 => AcousticBass(BassStyle::Arco),
        44 | 48..=51 | 92 => StageStrings,
        45 => PizzicatoStrings,
        46 => Harp,
        47 => Timpani,
        52..=54 | 85 | 91 | 121 | 126 => StageChoir,
        56 => Trumpet(TrumpetType::Normal),
        57 => Trombone,
        58 => Tuba,
        59 => Trumpet(TrumpetType::Muted),
        60 => FrenchHorn,
        61..=63 => StageHorns,
        64 => SopranoSax,
        65 => AltoSax,
        66 => TenorSax,
        67 => BaritoneSax,
        72 => Piccolo,
        73 => Flute,
        74 => Recorder,
        75 => PanFlute(PipeSkin::Wood),
        76 => BlownBottle,
        78 => Whistles,
        79 => Ocarina,
        80 | 81 | 83 | 84 | 86..=90 | 93..=97 | 99..=103 => Keyboard(KeyboardSkin::Synth),
        82 => PanFlute(PipeSkin::Gold),
        113 => Agogos,
        114 => SteelDrums,
        115 => Woodblocks,
        116 => TaikoDrum,
        117 => MelodicTom,
        118 => SynthDrum,
        124 => TelephoneRing,
        125 => Helicopter,
        127 => Gunshot,
        _ => return None,
    };
    Some(kind)
}

/// Kit voice animated by a percussion-channel note, if any
pub fn drum_for_note(note: u8) -> Option<DrumVoice> {
    let voice = match note {
        35 | 36 => DrumVoice::BassDrum,
        38 | 40 => DrumVoice::Snare,
        41 => DrumVoice::Tom(TomPitch::LowFloor),
        43 => DrumVoice::Tom(TomPitch::HighFloor),
        45 => DrumVoice::Tom(TomPitch::Low),
        47 => DrumVoice::Tom(TomPitch::LowMid),
        48 => DrumVoice::Tom(TomPitch::HighMid),
        50 => DrumVoice::Tom(TomPitch::High),
        49 => DrumVoice::CrashOne,
        57 => DrumVoice::CrashTwo,
        55 => DrumVoice::Splash,
        42 | 44 | 46 => DrumVoice::HiHat,
        _ => return None,
    };
    Some(voice)
}
