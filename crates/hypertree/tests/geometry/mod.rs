mod cube_scenario;
mod partition;
mod trace_ray;
