use crate::core::cost_model::CostRates;
use crate::core::trip_checks::TripLimits;
use crate::utils::error::Result;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait PlannerSettings: Send + Sync {
    fn cost_rates(&self) -> CostRates;
    fn trip_limits(&self) -> TripLimits;
    fn output_path(&self) -> &str;
    fn export_formats(&self) -> &[String];
    fn zip_exports(&self) -> bool;
    fn optimize_route(&self) -> bool;
}
