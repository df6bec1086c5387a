use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub pricing_saves_total: IntCounterVec,
    pub pricing_records: IntGauge,
    pub vehicles_total: IntGauge,
    pub locations_total: IntGauge,
    pub cascade_deleted_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let pricing_saves_total = IntCounterVec::new(
            Opts::new("pricing_saves_total", "Pricing upserts by scope and outcome"),
            &["scope", "outcome"],
        )
        .expect("valid pricing_saves_total metric");

        let pricing_records = IntGauge::new("pricing_records", "Stored pricing records")
            .expect("valid pricing_records metric");

        let vehicles_total = IntGauge::new("vehicles_total", "Stored vehicles")
            .expect("valid vehicles_total metric");

        let locations_total = IntGauge::new("locations_total", "Stored locations")
            .expect("valid locations_total metric");

        let cascade_deleted_total = IntCounter::new(
            "cascade_deleted_total",
            "Pricing records removed because their location or vehicle was deleted",
        )
        .expect("valid cascade_deleted_total metric");

        registry
            .register(Box::new(pricing_saves_total.clone()))
            .expect("register pricing_saves_total");
        registry
            .register(Box::new(pricing_records.clone()))
            .expect("register pricing_records");
        registry
            .register(Box::new(vehicles_total.clone()))
            .expect("register vehicles_total");
        registry
            .register(Box::new(locations_total.clone()))
            .expect("register locations_total");
        registry
            .register(Box::new(cascade_deleted_total.clone()))
            .expect("register cascade_deleted_total");

        Self {
            registry,
            pricing_saves_total,
            pricing_records,
            vehicles_total,
            locations_total,
            cascade_deleted_total,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
