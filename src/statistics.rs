use super::error::{Error, Result};
use super::sensor::{ResultSet, SensorId};
use std::fmt;

/// Readings picked by `ids`, one entry per (id, matching record) pair so
/// repeated ids count again. No ids, or an empty list, picks every record.
fn select(data: &ResultSet, ids: Option<&[SensorId]>) -> Vec<f64> {
    match ids {
        Some(ids) if !ids.is_empty() => ids
            .iter()
            .flat_map(move |id| {
                data.iter()
                    .filter(move |r| r.sensor_id == *id)
                    .map(|r| r.reading())
            })
            .collect(),
        _ => data.iter().map(|r| r.reading()).collect(),
    }
}

pub fn average(data: &ResultSet, ids: Option<&[SensorId]>) -> Result<f64> {
    if data.is_empty() {
        return Err(Error::EmptyState);
    }
    let readings = select(data, ids);
    let count = readings.len();
    let sum: f64 = readings.iter().sum();
    if count == 0 {
        let wanted: Vec<String> = ids
            .unwrap_or_default()
            .iter()
            .map(ToString::to_string)
            .collect();
        return Err(Error::Arithmetic(format!(
            "division by zero, no sensor matched [{}]",
            wanted.join(", ")
        )));
    }
    Ok(sum / count as f64)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub stdev: Option<f64>, // needs at least two readings
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n = {}, mean = {:0.3}, median = {:0.3}",
            self.count, self.mean, self.median
        )?;
        if let Some(stdev) = self.stdev {
            write!(f, ", \u{03C3} = {:0.3}", stdev)?;
        }
        Ok(())
    }
}

pub fn summary(data: &ResultSet, ids: Option<&[SensorId]>) -> Result<Summary> {
    let mean = average(data, ids)?;
    let readings = select(data, ids);
    let median = statistical::median(&readings);
    let stdev = if readings.len() > 1 {
        Some(statistical::standard_deviation(&readings, Some(mean)))
    } else {
        None
    };
    Ok(Summary {
        count: readings.len(),
        mean,
        median,
        stdev,
    })
}
