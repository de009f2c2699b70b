//! Material system for rendering

/// Material properties for 3D rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Base color (RGB)
    pub base_color: [f32; 3],

    /// Metallic factor (0.0 = dielectric, 1.0 = metallic)
    pub metallic: f32,

    /// Roughness factor (0.0 = mirror, 1.0 = completely rough)
    pub roughness: f32,

    /// Alpha/transparency (0.0 = transparent, 1.0 = opaque)
    pub alpha: f32,

    /// Render geometry as edges only
    pub wireframe: bool,
}

impl Material {
    /// Create a new material with default properties
    pub fn new() -> Self {
        Self {
            base_color: [1.0, 1.0, 1.0], // White
            metallic: 0.0,
            roughness: 0.5,
            alpha: 1.0,
            wireframe: false,
        }
    }

    /// Set the base color
    pub fn with_color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.base_color = [r, g, b];
        self
    }

    /// Set the metallic factor
    pub fn with_metallic(mut self, metallic: f32) -> Self {
        self.metallic = metallic.clamp(0.0, 1.0);
        self
    }

    /// Set the roughness factor
    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness.clamp(0.0, 1.0);
        self
    }

    /// Set the wireframe rendering flag
    pub fn with_wireframe(mut self, wireframe: bool) -> Self {
        self.wireframe = wireframe;
        self
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new()
    }
}

/// Material assignment of a scene node
///
/// Nodes come in three shapes: no material at all, a single material, or a
/// material array with possibly-unassigned slots. Modeling this as a tagged
/// variant gives traversals one uniform path over every assigned material
/// instead of ad hoc shape probing.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MaterialSlots {
    /// Node carries no material
    #[default]
    Empty,

    /// Node carries exactly one material
    Single(Material),

    /// Node carries a material array; unassigned slots are `None`
    Multiple(Vec<Option<Material>>),
}

impl MaterialSlots {
    /// Run a closure over every assigned material
    pub fn for_each_mut(&mut self, mut f: impl FnMut(&mut Material)) {
        match self {
            Self::Empty => {}
            Self::Single(material) => f(material),
            Self::Multiple(slots) => {
                for material in slots.iter_mut().flatten() {
                    f(material);
                }
            }
        }
    }

    /// Number of assigned materials
    pub fn assigned_count(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Single(_) => 1,
            Self::Multiple(slots) => slots.iter().flatten().count(),
        }
    }

    /// First assigned material, if any
    pub fn first(&self) -> Option<&Material> {
        match self {
            Self::Empty => None,
            Self::Single(material) => Some(material),
            Self::Multiple(slots) => slots.iter().flatten().next(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_each_mut_skips_unassigned_slots() {
        let mut slots = MaterialSlots::Multiple(vec![
            Some(Material::new()),
            None,
            Some(Material::new().with_color(1.0, 0.0, 0.0)),
        ]);

        let mut visited = 0;
        slots.for_each_mut(|_| visited += 1);
        assert_eq!(visited, 2);
        assert_eq!(slots.assigned_count(), 2);
    }

    #[test]
    fn empty_slots_have_no_materials() {
        let mut slots = MaterialSlots::Empty;
        let mut visited = 0;
        slots.for_each_mut(|_| visited += 1);
        assert_eq!(visited, 0);
        assert!(slots.first().is_none());
    }
}
