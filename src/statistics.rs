use serde::Serialize;

/// Running statistics of a fixed-point signal.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize)]
pub struct State {
    x0: i32,
    count: u32,
    min: i32,
    max: i32,
    m1: i64,
    // Data is taken relative to the first sample to extend the dynamic
    // range of the naive variance. `m2` overflows if
    // `sum((x-x0)**2) > u64::MAX`.
    m2: u64,
}

impl Default for State {
    fn default() -> Self {
        Self {
            x0: 0,
            count: 0,
            max: i32::MIN,
            min: i32::MAX,
            m1: 0,
            m2: 0,
        }
    }
}

impl State {
    pub fn update(&mut self, x: i32) {
        if self.count == 0 {
            self.x0 = x;
        }
        let x64 = x as i64 - self.x0 as i64;
        self.count += 1;
        self.m1 += x64;
        self.m2 += x64.unsigned_abs().pow(2);
        self.max = self.max.max(x);
        self.min = self.min.min(x);
    }

    pub fn get(&self) -> Statistics {
        let mut stat = Statistics {
            mean: 0,
            var: 0,
            max: self.max,
            min: self.min,
        };
        if self.count != 0 {
            let mean = self.m1 / self.count as i64;
            stat.mean = (mean + self.x0 as i64) as i32;
            stat.var = (self.m2 / self.count as u64)
                .saturating_sub((mean * mean) as u64);
        }
        stat
    }

    /// Statistics in physical units, `scale` per LSB.
    pub fn get_scaled(&self, scale: f64) -> ScaledStatistics {
        let mut stat = ScaledStatistics {
            mean: 0.,
            std: 0.,
            max: self.max as f64 * scale,
            min: self.min as f64 * scale,
        };
        if self.count != 0 {
            let c = 1. / self.count as f64;
            let mean = self.m1 as f64 * c;
            stat.mean = (mean + self.x0 as f64) * scale;
            let var = self.m2 as f64 * c - mean * mean;
            stat.std = var.max(0.).sqrt() * scale;
        }
        stat
    }
}

impl Extend<i32> for State {
    fn extend<I: IntoIterator<Item = i32>>(&mut self, iter: I) {
        for x in iter {
            self.update(x);
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize)]
pub struct Statistics {
    pub min: i32,
    pub max: i32,
    pub mean: i32,
    pub var: u64,
}

#[derive(Copy, Clone, PartialEq, Debug, Default, Serialize)]
pub struct ScaledStatistics {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std: f64,
}
