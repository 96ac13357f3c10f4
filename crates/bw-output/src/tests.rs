//! Tests for bw-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::{CsvWriter, STEPS_FILE, TRUST_FILE};
    use crate::row::{AgentStepRow, TrustRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn step_row(tick: u64, agent: &str, action: &str) -> AgentStepRow {
        AgentStepRow {
            tick,
            agent: agent.to_owned(),
            phase: "ApproachBlock".to_owned(),
            action: action.to_owned(),
            messages_sent: 1,
        }
    }

    fn trust_row(owner: &str, teammate: &str) -> TrustRow {
        TrustRow {
            tick: 10,
            owner: owner.to_owned(),
            teammate: teammate.to_owned(),
            reliability_accurate: 3,
            reliability_total: 4,
            competence_accurate: 1,
            competence_total: 1,
        }
    }

    fn records(dir: &TempDir, file: &str) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join(STEPS_FILE).exists());
        assert!(dir.path().join(TRUST_FILE).exists());
    }

    #[test]
    fn missing_directory_is_created() {
        let dir = tmp();
        let nested = dir.path().join("runs").join("first");
        let _w = CsvWriter::new(&nested).unwrap();
        assert!(nested.join(STEPS_FILE).exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(STEPS_FILE)).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["tick", "agent", "phase", "action", "messages_sent"]);

        let mut rdr2 = csv::Reader::from_path(dir.path().join(TRUST_FILE)).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers2,
            [
                "tick",
                "owner",
                "teammate",
                "reliability_accurate",
                "reliability_total",
                "competence_accurate",
                "competence_total",
            ]
        );
    }

    #[test]
    fn csv_steps_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_steps(&[step_row(0, "alice", "move north"), step_row(0, "bob", "")]).unwrap();
        w.finish().unwrap();

        let rows = records(&dir, STEPS_FILE);
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "alice");
        assert_eq!(&rows[0][3], "move north");
        assert_eq!(&rows[1][3], "");
        assert_eq!(&rows[1][4], "1");
    }

    #[test]
    fn csv_trust_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_trust(&[trust_row("alice", "bob")]).unwrap();
        w.finish().unwrap();

        let rows = records(&dir, TRUST_FILE);
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "10");
        assert_eq!(&rows[0][2], "bob");
        assert_eq!(&rows[0][3], "3");
        assert_eq!(&rows[0][4], "4");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

#[cfg(test)]
mod observer_tests {
    use bw_agent::{Action, Archetype, DROP_ZONE_TAG, WorldObject, WorldView};
    use bw_core::{AgentName, Colour, Location, ObjectId, Tick, Visualization};
    use bw_sim::{MemberConfig, TeamBuilder, TeamConfig, World};

    use crate::csv::{CsvWriter, STEPS_FILE, TRUST_FILE};
    use crate::row::{AgentStepRow, TrustRow};
    use crate::writer::OutputWriter;
    use crate::{OutputError, OutputResult, TeamOutputObserver};

    /// A drop zone and nothing else: members start up, then idle.
    struct Empty {
        members: Vec<AgentName>,
    }

    impl World for Empty {
        fn view_for(&self, agent: &AgentName, tick: Tick) -> WorldView {
            WorldView {
                tick,
                agent: agent.clone(),
                agent_location: Location::new(0, 0),
                team_members: self.members.clone(),
                objects: vec![WorldObject {
                    id: ObjectId::from("ghost_0"),
                    location: Location::new(5, 5),
                    class_tags: vec![DROP_ZONE_TAG.to_owned()],
                    is_open: false,
                    room_name: None,
                    visualization: Some(Visualization::new(1, 0.5, Some(Colour::new("#ff0000")))),
                    is_collectable: false,
                }],
                carrying: None,
            }
        }

        fn apply(&mut self, _agent: &AgentName, _action: &Action) {}
    }

    fn config(total_ticks: u64, interval: u64) -> TeamConfig {
        TeamConfig {
            total_ticks,
            output_interval_ticks: interval,
            members: vec![
                MemberConfig::new("alice", Archetype::Careful),
                MemberConfig::new("bob", Archetype::Careful),
            ],
            ..TeamConfig::default()
        }
    }

    fn world() -> Empty {
        Empty { members: vec![AgentName::from("alice"), AgentName::from("bob")] }
    }

    #[test]
    fn run_writes_steps_and_trust_scores() {
        let dir = tempfile::tempdir().unwrap();
        let mut team = TeamBuilder::new(config(4, 2), world()).build().unwrap();
        let mut obs = TeamOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        team.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let mut steps = csv::Reader::from_path(dir.path().join(STEPS_FILE)).unwrap();
        let steps: Vec<_> = steps.records().map(|r| r.unwrap()).collect();
        // 4 ticks × 2 members.
        assert_eq!(steps.len(), 8);
        assert_eq!(&steps[0][0], "0");
        assert_eq!(&steps[0][1], "alice");
        assert_eq!(&steps[1][1], "bob");
        // Nothing to do: idle, no action.
        assert_eq!(&steps[0][2], "");
        assert_eq!(&steps[0][3], "");
        // Start-up announcements: goal blocks and reputation.
        assert_eq!(&steps[0][4], "2");

        let mut trust = csv::Reader::from_path(dir.path().join(TRUST_FILE)).unwrap();
        let trust: Vec<_> = trust.records().map(|r| r.unwrap()).collect();
        // Snapshots at ticks 0 and 2, each owner rating one teammate.
        assert_eq!(trust.len(), 4);
        assert_eq!(&trust[0][0], "0");
        assert_eq!(&trust[0][1], "alice");
        assert_eq!(&trust[0][2], "bob");
        assert_eq!(&trust[1][1], "bob");
        assert_eq!(&trust[1][2], "alice");
        assert_eq!(&trust[2][0], "2");
    }

    #[test]
    fn no_snapshots_when_interval_is_zero() {
        let dir = tempfile::tempdir().unwrap();
        let mut team = TeamBuilder::new(config(3, 0), world()).build().unwrap();
        let mut obs = TeamOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        team.run(&mut obs).unwrap();

        let mut trust = csv::Reader::from_path(dir.path().join(TRUST_FILE)).unwrap();
        assert_eq!(trust.records().count(), 0);
    }

    /// Fails every write, counting attempts.
    #[derive(Default)]
    struct Broken {
        attempts: usize,
    }

    impl OutputWriter for Broken {
        fn write_steps(&mut self, _rows: &[AgentStepRow]) -> OutputResult<()> {
            self.attempts += 1;
            Err(OutputError::Io(std::io::Error::other(format!("write {}", self.attempts))))
        }

        fn write_trust(&mut self, _rows: &[TrustRow]) -> OutputResult<()> {
            self.attempts += 1;
            Err(OutputError::Io(std::io::Error::other("trust")))
        }

        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn first_error_kept_and_run_continues() {
        let mut team = TeamBuilder::new(config(3, 0), world()).build().unwrap();
        let mut obs = TeamOutputObserver::new(Broken::default());
        let summary = team.run(&mut obs).unwrap();
        assert_eq!(summary.ticks, 3);

        let err = obs.take_error().unwrap();
        assert_eq!(err.to_string(), "I/O error: write 1");
        assert!(obs.take_error().is_none());
        assert_eq!(obs.into_writer().attempts, 3);
    }
}
