//! Tests for synthetic pattern generators

#[cfg(test)]
mod tests {
    use gridsnap::RasterImage;
    use gridsnap::raster::pattern::{
        StripeAxis, checkerboard, gray, stripes, uniform, with_noise,
    };

    const DARK: [u8; 4] = [10, 20, 30, 255];
    const LIGHT: [u8; 4] = [200, 210, 220, 255];

    // Tests checkerboard cells alternate along both axes
    // Verified by dropping the y term from the parity
    #[test]
    fn test_checkerboard_parity() {
        let image = checkerboard(12, 12, 3, 4, [DARK, LIGHT]);

        assert_eq!(image.pixel(0, 0), DARK);
        assert_eq!(image.pixel(2, 3), DARK);
        assert_eq!(image.pixel(3, 0), LIGHT);
        assert_eq!(image.pixel(0, 4), LIGHT);
        assert_eq!(image.pixel(3, 4), DARK);
    }

    // Tests zero cell sizes behave like one pixel
    #[test]
    fn test_checkerboard_zero_cell() {
        let image = checkerboard(2, 1, 0, 0, [DARK, LIGHT]);

        assert_eq!(image.pixel(0, 0), DARK);
        assert_eq!(image.pixel(1, 0), LIGHT);
    }

    // Tests stripe levels cycle along the chosen axis only
    #[test]
    fn test_stripes_follow_axis() {
        let levels = [10, 20, 30];
        let columns = stripes(12, 4, 2, &levels, StripeAxis::Columns);
        let rows = stripes(4, 12, 2, &levels, StripeAxis::Rows);

        assert_eq!(columns.pixel(0, 3), gray(10));
        assert_eq!(columns.pixel(3, 0), gray(20));
        assert_eq!(columns.pixel(6, 2), gray(10));
        assert_eq!(rows.pixel(3, 5), gray(30));
        assert_eq!(rows.pixel(0, 1), gray(10));
    }

    // Tests empty level lists produce black
    #[test]
    fn test_stripes_without_levels() {
        let image = stripes(4, 4, 2, &[], StripeAxis::Columns);

        assert_eq!(image.pixel(3, 3), gray(0));
    }

    // Tests uniform fills every pixel
    #[test]
    fn test_uniform() {
        let image = uniform(5, 3, LIGHT);

        assert_eq!(image.width(), 5);
        assert_eq!(image.height(), 3);
        for y in 0..3 {
            for x in 0..5 {
                assert_eq!(image.pixel(x, y), LIGHT);
            }
        }
    }

    // Tests noise is reproducible from its seed
    // Verified by seeding from entropy
    #[test]
    fn test_noise_is_seeded() {
        let base = checkerboard(32, 32, 4, 4, [DARK, LIGHT]);

        let first = with_noise(&base, 8, 7);
        let second = with_noise(&base, 8, 7);
        let other = with_noise(&base, 8, 8);

        assert_eq!(first, second);
        assert_ne!(first, other);
        assert_ne!(first, base);
    }

    // Tests noise stays within its amplitude and keeps alpha
    #[test]
    fn test_noise_bounds() {
        let base = uniform(16, 16, [2, 128, 253, 77]);
        let noisy = with_noise(&base, 5, 42);

        for y in 0..16 {
            for x in 0..16 {
                let [r, g, b, a] = noisy.pixel(x, y);
                assert!(r <= 7);
                assert!((123..=133).contains(&g));
                assert!(b >= 248);
                assert_eq!(a, 77);
            }
        }
    }

    // Tests zero amplitude copies the image
    #[test]
    fn test_zero_noise_is_identity() {
        let base = checkerboard(8, 8, 2, 2, [DARK, LIGHT]);

        assert_eq!(with_noise(&base, 0, 1), base);
    }
}
