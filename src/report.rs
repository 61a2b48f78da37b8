use crate::testbench::PassReport;

pub fn print_report(pass: u32, report: &PassReport) {
    println!("{:20}: {}", "Pass", pass);
    println!("{:20}: {}", "Dimensions", report.dimensions);
    println!("{:20}: {}", "End Address", format_address(report.end_address));
    println!("{:20}: {}..={}", "Pixel Range", report.min, report.max);
    println!("{:20}: {}", "Delta", report.delta);
    println!("{:20}: {}", "Shift Level", report.shift);
    println!("{:20}: {}", "Pixels Written", report.writes);
    println!("{:20}: {} ({} to done)", "Ticks", report.ticks, report.ticks_to_done);
    println!();
}

fn format_address(address: u16) -> String {
    format!("{address:#06X}")
}
