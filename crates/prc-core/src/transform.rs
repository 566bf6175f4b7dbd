//! Affine placement transform (4x4 row-major matrix).

/// A 4x4 row-major affine matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    pub matrix: [[f64; 4]; 4],
}

impl Transform {
    pub fn identity() -> Self {
        let mut matrix = [[0.0; 4]; 4];
        for (i, row) in matrix.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        Self { matrix }
    }

    /// Builds a transform from 16 row-major values.
    pub fn from_row_major(values: &[f64; 16]) -> Self {
        let mut matrix = [[0.0; 4]; 4];
        for (i, value) in values.iter().enumerate() {
            matrix[i / 4][i % 4] = *value;
        }
        Self { matrix }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let t = Transform::identity();
        assert!(t.is_identity());
        assert_eq!(t.matrix[0][0], 1.0);
        assert_eq!(t.matrix[0][1], 0.0);
    }

    #[test]
    fn test_from_row_major() {
        let mut values = [0.0; 16];
        values[3] = 2.5; // translation x in row-major layout
        values[0] = 1.0;
        values[5] = 1.0;
        values[10] = 1.0;
        values[15] = 1.0;
        let t = Transform::from_row_major(&values);
        assert_eq!(t.matrix[0][3], 2.5);
        assert!(!t.is_identity());
    }
}
