use rand::{Rng, SeedableRng, distributions::WeightedIndex, prelude::Distribution, rngs::StdRng};

/// A fitted cluster: centroid in RGB space and the number of member pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub centroid: [f64; 3],
    pub count: usize,
}

/// Lloyd's k-means over RGB pixels with k-means++ seeding.
#[derive(Debug, Clone)]
pub struct KMeans {
    pub k: usize,
    pub n_init: usize,
    pub max_iter: usize,
    pub seed: u64,
}

impl Default for KMeans {
    fn default() -> Self {
        Self {
            k: 3,
            n_init: 10,
            max_iter: 300,
            seed: 42,
        }
    }
}

impl KMeans {
    pub fn with_k(k: usize) -> Self {
        Self {
            k,
            ..Self::default()
        }
    }

    /// Fits the pixels and returns clusters sorted by descending membership.
    ///
    /// Empty clusters are kept with a zero count so callers always see `k`
    /// entries when there is at least one pixel.
    pub fn fit(&self, pixels: &[[u8; 3]]) -> Vec<Cluster> {
        if pixels.is_empty() || self.k == 0 {
            return Vec::new();
        }

        let points: Vec<[f64; 3]> = pixels
            .iter()
            .map(|p| [p[0] as f64, p[1] as f64, p[2] as f64])
            .collect();
        let k = self.k.min(points.len());
        let mut rng = StdRng::seed_from_u64(self.seed);

        let mut best: Option<(f64, Vec<[f64; 3]>, Vec<usize>)> = None;
        for _ in 0..self.n_init.max(1) {
            let seeds = init_plus_plus(&points, k, &mut rng);
            let (centroids, labels, inertia) = self.lloyd(&points, seeds);

            let improved = best
                .as_ref()
                .map(|(best_inertia, _, _)| inertia < *best_inertia)
                .unwrap_or(true);
            if improved {
                best = Some((inertia, centroids, labels));
            }
        }

        let Some((_, centroids, labels)) = best else {
            return Vec::new();
        };

        let mut counts = vec![0usize; centroids.len()];
        for label in labels {
            counts[label] += 1;
        }

        let mut clusters: Vec<Cluster> = centroids
            .into_iter()
            .zip(counts)
            .map(|(centroid, count)| Cluster { centroid, count })
            .collect();
        // Stable sort keeps the lower cluster index first on ties.
        clusters.sort_by(|a, b| b.count.cmp(&a.count));
        clusters
    }

    fn lloyd(
        &self,
        points: &[[f64; 3]],
        mut centroids: Vec<[f64; 3]>,
    ) -> (Vec<[f64; 3]>, Vec<usize>, f64) {
        let mut labels = vec![usize::MAX; points.len()];

        for _ in 0..self.max_iter.max(1) {
            let mut changed = false;
            for (label, point) in labels.iter_mut().zip(points) {
                let nearest = nearest_centroid(point, &centroids).0;
                if *label != nearest {
                    *label = nearest;
                    changed = true;
                }
            }
            if !changed {
                break;
            }

            let mut sums = vec![[0.0f64; 3]; centroids.len()];
            let mut counts = vec![0usize; centroids.len()];
            for (label, point) in labels.iter().zip(points) {
                for channel in 0..3 {
                    sums[*label][channel] += point[channel];
                }
                counts[*label] += 1;
            }
            for (index, centroid) in centroids.iter_mut().enumerate() {
                // An emptied cluster keeps its previous centroid.
                if counts[index] > 0 {
                    let count = counts[index] as f64;
                    *centroid = [
                        sums[index][0] / count,
                        sums[index][1] / count,
                        sums[index][2] / count,
                    ];
                }
            }
        }

        let inertia = points
            .iter()
            .zip(&labels)
            .map(|(point, label)| squared_distance(point, &centroids[*label]))
            .sum();

        (centroids, labels, inertia)
    }
}

fn init_plus_plus(points: &[[f64; 3]], k: usize, rng: &mut StdRng) -> Vec<[f64; 3]> {
    let mut centroids = Vec::with_capacity(k);
    centroids.push(points[rng.gen_range(0..points.len())]);

    while centroids.len() < k {
        let weights: Vec<f64> = points
            .iter()
            .map(|point| nearest_centroid(point, &centroids).1)
            .collect();

        // All remaining points coincide with a centroid: duplicate one.
        let next = match WeightedIndex::new(&weights) {
            Ok(distribution) => points[distribution.sample(rng)],
            Err(_) => centroids[0],
        };
        centroids.push(next);
    }

    centroids
}

/// Index and squared distance of the closest centroid; ties go to the lowest index.
fn nearest_centroid(point: &[f64; 3], centroids: &[[f64; 3]]) -> (usize, f64) {
    let mut best = (0, f64::INFINITY);
    for (index, centroid) in centroids.iter().enumerate() {
        let distance = squared_distance(point, centroid);
        if distance < best.1 {
            best = (index, distance);
        }
    }
    best
}

fn squared_distance(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    let dr = a[0] - b[0];
    let dg = a[1] - b[1];
    let db = a[2] - b[2];
    dr * dr + dg * dg + db * db
}
