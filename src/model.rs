use serde::Serialize;
use std::fmt;

/// Meteorological variable compared between observations and the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Variable {
    Temperature,
    RelativeHumidity,
    WindSpeed,
}

impl Variable {
    /// Column order used for every site: temperature, relative humidity, wind speed.
    pub const ALL: [Variable; 3] = [
        Variable::Temperature,
        Variable::RelativeHumidity,
        Variable::WindSpeed,
    ];

    /// Short fragment used in statistic keys (e.g. `rms_bei_temp`)
    pub fn key(&self) -> &'static str {
        match self {
            Variable::Temperature => "temp",
            Variable::RelativeHumidity => "rh",
            Variable::WindSpeed => "ws",
        }
    }

    pub fn observed_column(&self) -> &'static str {
        match self {
            Variable::Temperature => "Temp_Obs",
            Variable::RelativeHumidity => "RH_Obs",
            Variable::WindSpeed => "WS_Obs",
        }
    }

    pub fn modeled_column(&self) -> &'static str {
        match self {
            Variable::Temperature => "Temp_Mod",
            Variable::RelativeHumidity => "RH_Mod",
            Variable::WindSpeed => "WS_Mod",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Variable::Temperature => "Temperature",
            Variable::RelativeHumidity => "Relative humidity",
            Variable::WindSpeed => "Wind speed",
        }
    }
}

/// Goodness-of-fit statistic computed for each site and variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Rmse,
    MeanBias,
    Correlation,
    StdDev,
    Nse,
}

impl Metric {
    /// Output order: rms, mb, cc, sd, nse.
    pub const ALL: [Metric; 5] = [
        Metric::Rmse,
        Metric::MeanBias,
        Metric::Correlation,
        Metric::StdDev,
        Metric::Nse,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Metric::Rmse => "rms",
            Metric::MeanBias => "mb",
            Metric::Correlation => "cc",
            Metric::StdDev => "sd",
            Metric::Nse => "nse",
        }
    }

    /// Column header used in the summary sheet
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Rmse => "RMSE",
            Metric::MeanBias => "MB",
            Metric::Correlation => "CC",
            Metric::StdDev => "SD",
            Metric::Nse => "NSE",
        }
    }
}

/// Composite key of one statistic: metric, site and variable.
///
/// Renders as `<metric>_<site>_<variable>`, e.g. `nse_kar_ws`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StatKey {
    pub metric: Metric,
    pub site: String,
    pub variable: Variable,
}

impl StatKey {
    pub fn new(metric: Metric, site: impl Into<String>, variable: Variable) -> Self {
        Self {
            metric,
            site: site.into(),
            variable,
        }
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}",
            self.metric.key(),
            self.site,
            self.variable.key()
        )
    }
}
