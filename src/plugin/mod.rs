mod cpu;
mod parser;
mod psutil;
mod registry;

pub use cpu::CpuParser;
pub use parser::PluginParser;
pub use psutil::PsutilParser;
pub use registry::ParserRegistry;
