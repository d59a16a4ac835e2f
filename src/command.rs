//! The turtle alphabet: one symbol, one command.

/// Direction of a turn, applied to the system angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    pub fn apply(self, degrees: f32) -> f32 {
        match self {
            Sign::Positive => degrees,
            Sign::Negative => -degrees,
        }
    }
}

/// Symbols the grammar reserves for later turtle features. They parse but do
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservedOp {
    /// `G`: move and draw without recording a polygon vertex.
    MoveWithoutRecord,
    /// `.`: record a polygon vertex.
    RecordVertex,
    /// `~`: incorporate a predefined surface.
    IncorporateSurface,
    /// `!`: decrement the segment diameter.
    DecrementDiameter,
    /// `` ` ``: step the color index.
    IncrementColorIndex,
    /// `%`: cut off the rest of the branch.
    CutBranch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurtleCommand {
    /// `F`
    DrawForward,
    /// `f`
    MoveForward,
    /// `+` / `-`
    Yaw(Sign),
    /// `^` / `&`
    Pitch(Sign),
    /// `\` / `/`
    Roll(Sign),
    /// `|`
    TurnAround,
    /// `$`
    RotateToVertical,
    /// `[`
    PushBranch,
    /// `]`
    PopBranch,
    /// `{`
    BeginPolygon,
    /// `}`
    EndPolygon,
    Reserved(ReservedOp),
}

impl TurtleCommand {
    /// Looks up the command for `symbol`. Symbols outside the alphabet map to
    /// `None` and are skipped by the interpreter.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        use TurtleCommand::*;
        let command = match symbol {
            'F' => DrawForward,
            'f' => MoveForward,
            '+' => Yaw(Sign::Positive),
            '-' => Yaw(Sign::Negative),
            '^' => Pitch(Sign::Positive),
            '&' => Pitch(Sign::Negative),
            '\\' => Roll(Sign::Positive),
            '/' => Roll(Sign::Negative),
            '|' => TurnAround,
            '$' => RotateToVertical,
            '[' => PushBranch,
            ']' => PopBranch,
            '{' => BeginPolygon,
            '}' => EndPolygon,
            'G' => Reserved(ReservedOp::MoveWithoutRecord),
            '.' => Reserved(ReservedOp::RecordVertex),
            '~' => Reserved(ReservedOp::IncorporateSurface),
            '!' => Reserved(ReservedOp::DecrementDiameter),
            '`' => Reserved(ReservedOp::IncrementColorIndex),
            '%' => Reserved(ReservedOp::CutBranch),
            _ => return None,
        };
        Some(command)
    }
}
