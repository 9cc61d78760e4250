use rand::Rng;
use ratatui::style::Color;

/// The closed set of shapes a piece can be spawned from.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, derive_more::Display)]
pub enum ShapeKind {
    I,
    O,
    S,
    Z,
    T,
    J,
    L,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::T,
        ShapeKind::J,
        ShapeKind::L,
    ];

    /// Spawn orientation, row 0 first. Every matrix is rectangular.
    pub fn matrix(self) -> Vec<Vec<bool>> {
        const X: bool = true;
        const O: bool = false;
        match self {
            ShapeKind::I => vec![vec![X, X, X, X]],
            ShapeKind::O => vec![vec![X, X], vec![X, X]],
            ShapeKind::S => vec![vec![O, X, X], vec![X, X, O]],
            ShapeKind::Z => vec![vec![X, X, O], vec![O, X, X]],
            ShapeKind::T => vec![vec![X, X, X], vec![O, X, O]],
            ShapeKind::J => vec![vec![X, O, O], vec![X, X, X]],
            ShapeKind::L => vec![vec![O, O, X], vec![X, X, X]],
        }
    }

    pub fn color(self) -> Color {
        match self {
            ShapeKind::I => Color::Cyan,
            ShapeKind::O => Color::Yellow,
            ShapeKind::S => Color::Green,
            ShapeKind::Z => Color::Red,
            ShapeKind::T => Color::Magenta,
            ShapeKind::J => Color::Blue,
            ShapeKind::L => Color::LightYellow,
        }
    }
}

/// An immutable shape template: occupancy matrix plus its color.
#[derive(Clone, PartialEq, Debug)]
pub struct Shape {
    pub kind: ShapeKind,
    pub matrix: Vec<Vec<bool>>,
    pub color: Color,
}

impl From<ShapeKind> for Shape {
    fn from(kind: ShapeKind) -> Self {
        Self {
            kind,
            matrix: kind.matrix(),
            color: kind.color(),
        }
    }
}

pub fn all_shapes() -> Vec<Shape> {
    ShapeKind::ALL.into_iter().map(Shape::from).collect()
}

/// Uniform pick from the catalog, independent of any previous pick.
pub fn random_shape<R: Rng + ?Sized>(rng: &mut R) -> Shape {
    let kind = ShapeKind::ALL[rng.gen_range(0..ShapeKind::ALL.len())];
    Shape::from(kind)
}
