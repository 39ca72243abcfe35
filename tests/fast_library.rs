#![cfg(not(feature = "fast"))]
//! Gateway driving the loopback engine linked in place of the FAST library

use fast_sfunc::{
    ErrLevel, FastLibrary, FastLibraryError, FastSFunc, GatewayError, InputFrame, Inputs,
    Parameters, Phase, Runner, SFunction,
};

// The library can only be claimed once per process: everything runs in one test.
#[test]
fn loopback_engine() {
    let mut runner = Runner::new(FastSFunc::new(FastLibrary::open().unwrap()));
    assert!(matches!(FastLibrary::open(), Err(FastLibraryError::Busy)));

    let inputs = Inputs::constant(
        InputFrame::new(2)
            .gen_trq(&[4.2e4])
            .unwrap()
            .elec_pwr(&[5e6])
            .unwrap(),
    );
    let parameters = Parameters::new("5MW_Land.fst")
        .t_max(0.05)
        .additional_inputs(2);
    let record = runner.run(&parameters, &inputs).unwrap();
    assert_eq!(record.channels, vec!["Time", "GenTq", "ElecPwr", "Step"]);
    assert_eq!(record.dt, 0.0125);
    assert_eq!(record.time.len(), 5);
    assert_eq!(record.channel("Time").unwrap(), record.time);
    assert_eq!(record.channel("Step").unwrap(), vec![0., 1., 2., 3., 4.]);
    assert_eq!(
        record.channel("GenTq").unwrap(),
        vec![0., 4.2e4, 4.2e4, 4.2e4, 4.2e4]
    );
    assert_eq!(runner.host().dt(), Some(0.0125));
    assert_eq!(runner.host().out_list().unwrap().len(), 4);
    assert_eq!(runner.sfunc().abort_level(), ErrLevel::Severe);
    assert_eq!(runner.sfunc().phase(), Phase::Terminated);
    drop(runner);

    // engine failure at sizing
    let mut runner = Runner::new(FastSFunc::new(FastLibrary::open().unwrap()));
    let error = runner
        .run(&Parameters::new("").t_max(1.), &Inputs::constant(InputFrame::new(0)))
        .unwrap_err();
    assert!(matches!(
        error,
        fast_sfunc::RunnerError::Gateway(GatewayError::Engine {
            level: ErrLevel::Fatal,
            ..
        })
    ));
    assert_eq!(
        runner.host().error_status(),
        Some("FAST_Sizes: input file name is empty.")
    );
    drop(runner);

    // restart skips the start call and keeps stepping
    let mut runner = Runner::new(FastSFunc::new(FastLibrary::open().unwrap()));
    let record = runner
        .run(
            &Parameters::new("5MW_Land.fst")
                .t_max(0.025)
                .restart_from("5MW_Land.1000"),
            &Inputs::constant(InputFrame::new(0)),
        )
        .unwrap();
    assert!(record.channels.is_empty());
    assert_eq!(record.outputs[0], vec![0.; 4]);
    assert_eq!(record.outputs[2][3], 2.);
    assert!(runner
        .host()
        .console()
        .iter()
        .any(|line| line.contains("restarted from 5MW_Land.1000")));
    drop(runner);

    // checkpoint through the gateway
    let mut sfunc = FastSFunc::new(FastLibrary::open().unwrap());
    let mut host = fast_sfunc::HeadlessHost::new();
    sfunc
        .configure(&mut host, &Parameters::new("5MW_Land.fst").t_max(1.))
        .unwrap();
    sfunc.start(&mut host).unwrap();
    assert!(sfunc.checkpoint(&mut host, "5MW_Land.0").is_ok());
    assert!(sfunc.checkpoint(&mut host, "").is_err());
    assert_eq!(sfunc.phase(), Phase::Aborted);
    sfunc.terminate();
}
