//! Localized coaching text
//!
//! Every user-facing string is produced here, so markers and advice stay
//! deterministic: the same values in the same locale give the same text.

use crate::config::Locale;

/// One piece of coaching advice, carrying the values its text embeds
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Advice {
    /// Filler rate above the moderate band
    FillersSevere { count: usize, rate: f32 },
    /// Filler rate in the moderate band
    FillersModerate { count: usize, rate: f32 },
    /// Filler rate in the good band
    FillersGood { count: usize },
    /// Almost no fillers
    FillersExcellent,
    /// Far below the optimal window
    PaceVerySlow { wpm: u32, min: u32, max: u32 },
    /// Slightly below the optimal window
    PaceSlow { wpm: u32, min: u32, max: u32 },
    /// Far above the optimal window
    PaceVeryFast { wpm: u32, min: u32, max: u32 },
    /// Slightly above the optimal window
    PaceFast { wpm: u32 },
    /// Inside the optimal window
    PaceOptimal { wpm: u32 },
    /// Pitch varies too much
    PitchUnstable,
    /// Pitch barely varies
    PitchFlat,
    /// Volume barely varies
    EnergyMonotone,
    /// Volume swings widely
    EnergyErratic,
    /// Too many pauses
    PausesExcessive { count: u32 },
    /// Overall confidence is low
    ConfidenceLow,
    /// Overall confidence is high
    ConfidenceHigh,
    /// Clarity is high
    ClarityHigh,
}

impl Advice {
    /// Render the advice in the given locale
    pub fn render(&self, locale: Locale) -> String {
        match locale {
            Locale::En => self.render_en(),
            Locale::Es => self.render_es(),
        }
    }

    fn render_en(&self) -> String {
        match *self {
            Advice::FillersSevere { count, rate } => format!(
                "Reduce filler words ({} detected, {:.1} per minute). \
                 Practice pausing deliberately instead of filling the silence.",
                count, rate
            ),
            Advice::FillersModerate { count, rate } => format!(
                "You used {} filler words ({:.1} per minute). \
                 Try replacing them with short, silent pauses.",
                count, rate
            ),
            Advice::FillersGood { count } => format!(
                "Good control of filler words ({} detected). Keep it up.",
                count
            ),
            Advice::FillersExcellent => {
                "Excellent! Almost no filler words. Your delivery is clean.".to_string()
            }
            Advice::PaceVerySlow { wpm, min, max } => format!(
                "Your pace is very slow ({} WPM). Aim for {}-{} words per minute \
                 to keep your audience engaged.",
                wpm, min, max
            ),
            Advice::PaceSlow { wpm, min, max } => format!(
                "Your pace is a little slow ({} WPM). Try speeding up to {}-{} words per minute.",
                wpm, min, max
            ),
            Advice::PaceVeryFast { wpm, min, max } => format!(
                "You are speaking very fast ({} WPM). Slow down to {}-{} words per minute \
                 and breathe between ideas.",
                wpm, min, max
            ),
            Advice::PaceFast { wpm } => format!(
                "You speak a little fast ({} WPM). Take a deep breath and slow down for clarity.",
                wpm
            ),
            Advice::PaceOptimal { wpm } => {
                format!("Great pace! ({} WPM is in the optimal range)", wpm)
            }
            Advice::PitchUnstable => "Your pitch varies a lot. Practice a steadier tone \
                 to project confidence."
                .to_string(),
            Advice::PitchFlat => "Your pitch is very flat. Vary your intonation to \
                 highlight key points."
                .to_string(),
            Advice::EnergyMonotone => "Your voice sounds monotone. Add emphasis and volume \
                 variation to hold interest."
                .to_string(),
            Advice::EnergyErratic => "Your volume changes abruptly. Aim for a more even \
                 projection."
                .to_string(),
            Advice::PausesExcessive { count } => format!(
                "Too many pauses ({}). Practice fluency by linking ideas more naturally.",
                count
            ),
            Advice::ConfidenceLow => "Work on projecting more confidence: keep eye contact, \
                 use natural gestures and rehearse your content."
                .to_string(),
            Advice::ConfidenceHigh => {
                "You sound confident. Your delivery projects authority.".to_string()
            }
            Advice::ClarityHigh => {
                "Your message is clear and easy to follow.".to_string()
            }
        }
    }

    fn render_es(&self) -> String {
        match *self {
            Advice::FillersSevere { count, rate } => format!(
                "Reduce las muletillas ({} detectadas, {:.1} por minuto). \
                 Practica hacer pausas conscientes en lugar de usar palabras de relleno.",
                count, rate
            ),
            Advice::FillersModerate { count, rate } => format!(
                "Usaste {} muletillas ({:.1} por minuto). \
                 Intenta reemplazarlas por pausas breves y silenciosas.",
                count, rate
            ),
            Advice::FillersGood { count } => format!(
                "Buen control de las muletillas ({} detectadas). Sigue así.",
                count
            ),
            Advice::FillersExcellent => {
                "¡Excelente! Casi no usas muletillas. Tu discurso es limpio.".to_string()
            }
            Advice::PaceVerySlow { wpm, min, max } => format!(
                "Tu ritmo es muy lento ({} PPM). Apunta a {}-{} palabras por minuto \
                 para mantener la atención.",
                wpm, min, max
            ),
            Advice::PaceSlow { wpm, min, max } => format!(
                "Tu ritmo es un poco lento ({} PPM). Intenta acelerar a {}-{} palabras por minuto.",
                wpm, min, max
            ),
            Advice::PaceVeryFast { wpm, min, max } => format!(
                "Hablas muy rápido ({} PPM). Baja a {}-{} palabras por minuto \
                 y respira entre ideas.",
                wpm, min, max
            ),
            Advice::PaceFast { wpm } => format!(
                "Hablas un poco rápido ({} PPM). Respira profundo y reduce el ritmo \
                 para mayor claridad.",
                wpm
            ),
            Advice::PaceOptimal { wpm } => {
                format!("¡Excelente ritmo! ({} PPM está en el rango óptimo)", wpm)
            }
            Advice::PitchUnstable => "Tu tono de voz varía mucho. Practica mantener un tono \
                 más estable para proyectar confianza."
                .to_string(),
            Advice::PitchFlat => "Tu tono es muy plano. Varía la entonación para resaltar \
                 las ideas clave."
                .to_string(),
            Advice::EnergyMonotone => "Tu voz suena monótona. Añade más énfasis y variación \
                 de volumen para mantener el interés."
                .to_string(),
            Advice::EnergyErratic => "Tu volumen cambia bruscamente. Busca una proyección \
                 más uniforme."
                .to_string(),
            Advice::PausesExcessive { count } => format!(
                "Demasiadas pausas ({}). Practica la fluidez conectando ideas de forma \
                 más natural.",
                count
            ),
            Advice::ConfidenceLow => "Trabaja en proyectar más confianza: mantén contacto \
                 visual, usa gestos naturales y practica tu contenido."
                .to_string(),
            Advice::ConfidenceHigh => {
                "Suenas seguro. Tu forma de hablar transmite autoridad.".to_string()
            }
            Advice::ClarityHigh => "Tu mensaje es claro y fácil de seguir.".to_string(),
        }
    }
}

/// Label of a filler marker
pub fn filler_label(locale: Locale, word: &str) -> String {
    match locale {
        Locale::En => format!("Filler: '{}'", word),
        Locale::Es => format!("Muletilla: '{}'", word),
    }
}

/// Reason of a filler marker
pub fn filler_reason(locale: Locale, confidence: f32, rate: f32) -> String {
    let percent = (confidence * 100.0).round();
    match locale {
        Locale::En => format!(
            "Filler word detected with {:.0}% confidence ({:.1} per minute overall)",
            percent, rate
        ),
        Locale::Es => format!(
            "Palabra de relleno detectada con {:.0}% de confianza ({:.1} por minuto en total)",
            percent, rate
        ),
    }
}

/// Label of a pause marker
pub fn pause_label(locale: Locale) -> String {
    match locale {
        Locale::En => "Long pause".to_string(),
        Locale::Es => "Pausa prolongada".to_string(),
    }
}

/// Reason of a pause marker
pub fn pause_reason(locale: Locale, start: f32, pause_count: u32) -> String {
    match locale {
        Locale::En => format!(
            "Silence detected at {:.1}s ({} pauses in total)",
            start, pause_count
        ),
        Locale::Es => format!(
            "Silencio detectado en {:.1}s ({} pausas en total)",
            start, pause_count
        ),
    }
}
