//! Step reporter: prints PASS/FAIL per step and a summary.

pub struct Reporter {
    passed: usize,
    failed: usize,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter {
    pub fn new() -> Self {
        Self {
            passed: 0,
            failed: 0,
        }
    }

    pub fn record(&mut self, step: &str, outcome: &Result<(), String>) {
        match outcome {
            Ok(()) => {
                self.passed += 1;
                println!("PASS  {step}");
            }
            Err(reason) => {
                self.failed += 1;
                println!("FAIL  {step}");
                println!("        {reason}");
            }
        }
    }

    pub fn print_summary(&self) {
        println!();
        println!("────────────────────────────────────────────────────");
        println!("Results: {} passed, {} failed", self.passed, self.failed);
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}
