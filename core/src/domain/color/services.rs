use crate::domain::color::{
    clustering::{Cluster, KMeans},
    entities::{ColorName, ColorSwatch},
};

/// Clusters smaller than this share of the image are dropped.
pub const MIN_SWATCH_PERCENTAGE: f64 = 5.0;

/// Turns raw pixels into at most `k` named swatches ordered by share.
///
/// Always returns at least one swatch: the largest cluster when none clear
/// [`MIN_SWATCH_PERCENTAGE`], or the failure sentinel when there are no pixels.
pub fn dominant_swatches(pixels: &[[u8; 3]], kmeans: &KMeans) -> Vec<ColorSwatch> {
    let clusters = kmeans.fit(pixels);
    let total = pixels.len() as f64;
    let tenths = apportion_tenths(&clusters, pixels.len());

    let swatches: Vec<ColorSwatch> = clusters
        .iter()
        .zip(&tenths)
        .filter(|(cluster, _)| percentage(cluster, total) >= MIN_SWATCH_PERCENTAGE)
        .map(|(cluster, tenths)| to_swatch(cluster, *tenths))
        .collect();

    if !swatches.is_empty() {
        return swatches;
    }

    match clusters.first().zip(tenths.first()) {
        Some((largest, tenths)) => vec![to_swatch(largest, *tenths)],
        None => vec![ColorSwatch::extraction_failed()],
    }
}

fn percentage(cluster: &Cluster, total: f64) -> f64 {
    cluster.count as f64 / total * 100.0
}

/// Rounds cluster shares to tenths of a percent with the largest-remainder
/// method, so the rounded shares of all clusters add up to exactly 1000.
fn apportion_tenths(clusters: &[Cluster], total: usize) -> Vec<u32> {
    if total == 0 {
        return vec![0; clusters.len()];
    }

    let exact: Vec<f64> = clusters
        .iter()
        .map(|cluster| cluster.count as f64 * 1000.0 / total as f64)
        .collect();
    let mut tenths: Vec<u32> = exact.iter().map(|share| share.floor() as u32).collect();

    let assigned: u32 = tenths.iter().sum();
    let mut by_remainder: Vec<usize> = (0..clusters.len()).collect();
    by_remainder.sort_by(|&a, &b| {
        let remainder = |i: usize| exact[i] - exact[i].floor();
        remainder(b).total_cmp(&remainder(a))
    });

    for &index in by_remainder
        .iter()
        .take(1000u32.saturating_sub(assigned) as usize)
    {
        tenths[index] += 1;
    }

    tenths
}

fn to_swatch(cluster: &Cluster, tenths: u32) -> ColorSwatch {
    let [r, g, b] = cluster.centroid;
    ColorSwatch::new(
        ColorName::from_rgb(r, g, b),
        [truncate(r), truncate(g), truncate(b)],
        f64::from(tenths) / 10.0,
    )
}

fn truncate(channel: f64) -> u8 {
    channel.clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_pixels_give_one_full_swatch() {
        let swatches = dominant_swatches(&vec![[200, 30, 30]; 400], &KMeans::default());

        assert_eq!(swatches.len(), 1);
        assert_eq!(swatches[0].name, ColorName::Red);
        assert_eq!(swatches[0].percentage, 100.0);
        assert_eq!(swatches[0].rgb, [200, 30, 30]);
    }

    #[test]
    fn test_small_clusters_are_dropped() {
        let mut pixels = vec![[250, 250, 250]; 97];
        pixels.extend(vec![[10, 10, 10]; 2]);
        pixels.push([30, 150, 40]);

        let swatches = dominant_swatches(&pixels, &KMeans::default());

        assert_eq!(swatches.len(), 1);
        assert_eq!(swatches[0].name, ColorName::White);
        assert_eq!(swatches[0].percentage, 97.0);
    }

    #[test]
    fn test_swatches_sorted_and_bounded() {
        let mut pixels = vec![[60, 80, 140]; 500];
        pixels.extend(vec![[250, 250, 250]; 300]);
        pixels.extend(vec![[10, 10, 10]; 200]);

        let swatches = dominant_swatches(&pixels, &KMeans::default());

        assert_eq!(swatches.len(), 3);
        assert!(swatches.windows(2).all(|w| w[0].percentage >= w[1].percentage));
        let total: f64 = swatches.iter().map(|s| s.percentage).sum();
        assert!(total <= 100.0);
        assert_eq!(swatches[0].name, ColorName::Blue);
    }

    #[test]
    fn test_rounded_shares_never_exceed_hundred() {
        let mut pixels = vec![[250, 250, 250]; 4];
        pixels.push([10, 10, 10]);
        pixels.push([200, 20, 20]);

        let swatches = dominant_swatches(&pixels, &KMeans::default());

        assert_eq!(swatches.len(), 3);
        let percentages: Vec<f64> = swatches.iter().map(|s| s.percentage).collect();
        assert_eq!(percentages, vec![66.7, 16.7, 16.6]);
        let tenths: i64 = percentages.iter().map(|p| (p * 10.0).round() as i64).sum();
        assert_eq!(tenths, 1000);
        let total: f64 = percentages.iter().sum();
        assert!(total <= 100.0, "sum {total} > 100");
    }

    #[test]
    fn test_apportion_tenths_sums_to_thousand() {
        let clusters: Vec<Cluster> = [1, 1, 1]
            .into_iter()
            .map(|count| Cluster {
                centroid: [0.0; 3],
                count,
            })
            .collect();

        let tenths = apportion_tenths(&clusters, 3);

        assert_eq!(tenths, vec![334, 333, 333]);
        assert_eq!(apportion_tenths(&clusters[..1], 0), vec![0]);
    }

    #[test]
    fn test_falls_back_to_largest_cluster() {
        let kmeans = KMeans::with_k(30);
        let pixels: Vec<[u8; 3]> = (0..30u8).map(|i| [i * 8, 255 - i * 8, 100]).collect();

        let swatches = dominant_swatches(&pixels, &kmeans);

        assert_eq!(swatches.len(), 1);
        assert!(swatches[0].percentage < MIN_SWATCH_PERCENTAGE);
    }

    #[test]
    fn test_no_pixels_returns_sentinel() {
        let swatches = dominant_swatches(&[], &KMeans::default());
        assert_eq!(swatches, vec![ColorSwatch::extraction_failed()]);
    }
}
